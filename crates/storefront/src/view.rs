//! View state and its pure transition function.
//!
//! The page's transient selections live in [`ViewState`]. User interactions
//! are [`Action`]s; [`ViewState::apply`] turns the current state and an
//! action into the next state plus at most one [`Effect`] for the
//! application shell to carry out (a catalog fetch or a cart add). Nothing
//! in this module performs I/O.

use product_gallery_core::{Category, Product, SortKey};

/// Product detail dialog.
///
/// A closed dialog carries no product.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ProductDialog {
    #[default]
    Closed,
    Open(Product),
}

impl ProductDialog {
    /// The product being shown, if open.
    #[must_use]
    pub const fn product(&self) -> Option<&Product> {
        match self {
            Self::Open(product) => Some(product),
            Self::Closed => None,
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }
}

/// Cart summary dialog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CartDialog {
    #[default]
    Closed,
    Open,
}

impl CartDialog {
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Transient page selections. Reset to defaults on restart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Selected category; `None` shows all products.
    pub category: Option<Category>,
    pub sort: SortKey,
    pub product_dialog: ProductDialog,
    pub cart_dialog: CartDialog,
}

/// A user interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Category selector changed (`None` = "All Categories").
    SelectCategory(Option<Category>),
    /// Sort selector changed.
    SelectSort(SortKey),
    /// A grid item was selected.
    OpenProduct(Product),
    /// Detail dialog dismissed, from its close control or the backdrop.
    DismissProduct,
    /// "Add to Cart" in the detail dialog.
    AddSelectedToCart,
    /// Header cart control.
    OpenCart,
    /// Cart dialog close control.
    CloseCart,
}

/// Work the shell performs after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Re-fetch the product list for this category.
    FetchProducts(Option<Category>),
    /// Append this product to the cart.
    AddToCart(Product),
}

/// Result of applying an action.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: ViewState,
    pub effect: Option<Effect>,
}

impl Transition {
    const fn quiet(state: ViewState) -> Self {
        Self {
            state,
            effect: None,
        }
    }
}

impl ViewState {
    /// Compute the next state for `action`.
    #[must_use]
    pub fn apply(self, action: Action) -> Transition {
        match action {
            Action::SelectCategory(category) => {
                if category == self.category {
                    return Transition::quiet(self);
                }
                Transition {
                    effect: Some(Effect::FetchProducts(category.clone())),
                    state: Self { category, ..self },
                }
            }
            Action::SelectSort(sort) => Transition::quiet(Self { sort, ..self }),
            Action::OpenProduct(product) => Transition::quiet(Self {
                product_dialog: ProductDialog::Open(product),
                ..self
            }),
            Action::DismissProduct => Transition::quiet(Self {
                product_dialog: ProductDialog::Closed,
                ..self
            }),
            Action::AddSelectedToCart => match self.product_dialog {
                ProductDialog::Open(product) => Transition {
                    state: Self {
                        product_dialog: ProductDialog::Closed,
                        ..self
                    },
                    effect: Some(Effect::AddToCart(product)),
                },
                ProductDialog::Closed => Transition::quiet(self),
            },
            Action::OpenCart => Transition::quiet(Self {
                cart_dialog: CartDialog::Open,
                ..self
            }),
            Action::CloseCart => Transition::quiet(Self {
                cart_dialog: CartDialog::Closed,
                ..self
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use product_gallery_core::{Price, ProductId, Rating};

    fn product(id: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Price::from_cents(1000).unwrap(),
            description: String::new(),
            category: Category::new("electronics"),
            image: String::new(),
            rating: Rating {
                rate: 4.0,
                count: 1,
            },
        }
    }

    #[test]
    fn test_default_state() {
        let state = ViewState::default();
        assert_eq!(state.category, None);
        assert_eq!(state.sort, SortKey::None);
        assert!(!state.product_dialog.is_open());
        assert!(!state.cart_dialog.is_open());
    }

    #[test]
    fn test_category_change_requests_one_fetch() {
        let electronics = Category::new("electronics");
        let t = ViewState::default().apply(Action::SelectCategory(Some(electronics.clone())));
        assert_eq!(t.state.category, Some(electronics.clone()));
        assert_eq!(t.effect, Some(Effect::FetchProducts(Some(electronics))));
    }

    #[test]
    fn test_reselecting_same_category_is_quiet() {
        let state = ViewState {
            category: Some(Category::new("jewelery")),
            ..ViewState::default()
        };
        let t = state
            .clone()
            .apply(Action::SelectCategory(Some(Category::new("jewelery"))));
        assert_eq!(t.state, state);
        assert_eq!(t.effect, None);
    }

    #[test]
    fn test_back_to_all_categories_fetches_everything() {
        let state = ViewState {
            category: Some(Category::new("jewelery")),
            ..ViewState::default()
        };
        let t = state.apply(Action::SelectCategory(None));
        assert_eq!(t.state.category, None);
        assert_eq!(t.effect, Some(Effect::FetchProducts(None)));
    }

    #[test]
    fn test_sort_change_has_no_effect() {
        let t = ViewState::default().apply(Action::SelectSort(SortKey::PriceAscending));
        assert_eq!(t.state.sort, SortKey::PriceAscending);
        assert_eq!(t.effect, None);
    }

    #[test]
    fn test_open_and_dismiss_product() {
        let t = ViewState::default().apply(Action::OpenProduct(product(1)));
        assert_eq!(t.state.product_dialog.product().unwrap().id, ProductId::new(1));

        let t = t.state.apply(Action::DismissProduct);
        assert_eq!(t.state.product_dialog, ProductDialog::Closed);
        assert_eq!(t.state.product_dialog.product(), None);
    }

    #[test]
    fn test_add_selected_adds_then_closes() {
        let open = ViewState::default().apply(Action::OpenProduct(product(2))).state;
        let t = open.apply(Action::AddSelectedToCart);
        assert_eq!(t.state.product_dialog, ProductDialog::Closed);
        assert_eq!(t.effect, Some(Effect::AddToCart(product(2))));
    }

    #[test]
    fn test_add_with_closed_dialog_does_nothing() {
        let t = ViewState::default().apply(Action::AddSelectedToCart);
        assert_eq!(t.state, ViewState::default());
        assert_eq!(t.effect, None);
    }

    #[test]
    fn test_dialogs_are_independent() {
        let state = ViewState::default()
            .apply(Action::OpenCart)
            .state
            .apply(Action::OpenProduct(product(3)))
            .state;
        assert!(state.cart_dialog.is_open());
        assert!(state.product_dialog.is_open());

        let state = state.apply(Action::CloseCart).state;
        assert!(!state.cart_dialog.is_open());
        assert!(state.product_dialog.is_open());
    }
}
