use crate::config::Locale;

use super::Notice;

/// Renders notices as user-facing text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Messages {
    locale: Locale,
}

impl Messages {
    pub fn new(locale: Locale) -> Self {
        Messages { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn render(&self, notice: Notice) -> &'static str {
        match self.locale {
            Locale::En => english(notice),
            Locale::PtBr => portuguese(notice),
        }
    }
}

fn english(notice: Notice) -> &'static str {
    match notice {
        Notice::ProductAdded => "Product added to cart",
        Notice::OutOfStock => "Product out of stock",
        Notice::AddFailed => "Could not add product",
        Notice::ProductNotFound => "Product not found",
        Notice::RemoveFailed => "Could not remove product",
        Notice::InvalidQuantity => "Invalid quantity",
        Notice::QuantityExceedsStock => "Requested quantity is out of stock",
        Notice::ItemNotInCart => "Could not update product",
        Notice::UpdateFailed => "Could not update product quantity",
    }
}

fn portuguese(notice: Notice) -> &'static str {
    match notice {
        Notice::ProductAdded => "Produto adicionado ao carrinho",
        Notice::OutOfStock => "Produto sem estoque",
        Notice::AddFailed => "Erro ao adicionar o produto",
        Notice::ProductNotFound => "Produto não encontrado",
        Notice::RemoveFailed => "Erro ao remover o produto",
        Notice::InvalidQuantity => "Erro na alteração da quantidade",
        Notice::QuantityExceedsStock => "Quantidade solicitada fora de estoque",
        Notice::ItemNotInCart => "Erro na alteração do produto",
        Notice::UpdateFailed => "Erro na alteração da quantidade do produto",
    }
}
