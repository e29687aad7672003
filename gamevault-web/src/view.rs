use gamevault_core::BrowseView;

/// Top-level navigation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    NewReleases,
    OnSale,
    Favorites,
    Cart,
    Library,
    Wishlist,
}

impl View {
    pub const NAV: [Self; 7] = [
        Self::Home,
        Self::NewReleases,
        Self::OnSale,
        Self::Favorites,
        Self::Cart,
        Self::Library,
        Self::Wishlist,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "Store",
            Self::NewReleases => "New Releases",
            Self::OnSale => "On Sale",
            Self::Favorites => "Favorites",
            Self::Cart => "Cart",
            Self::Library => "Library",
            Self::Wishlist => "Wishlist",
        }
    }

    /// Catalog filter behind this view, `None` for the per-user pages.
    #[must_use]
    pub const fn browse(self) -> Option<BrowseView> {
        match self {
            Self::Home => Some(BrowseView::Home),
            Self::NewReleases => Some(BrowseView::NewReleases),
            Self::OnSale => Some(BrowseView::OnSale),
            Self::Favorites => Some(BrowseView::Favorites),
            Self::Cart | Self::Library | Self::Wishlist => None,
        }
    }

    /// Cart, library and wishlist show nothing useful to a signed-out visitor.
    #[must_use]
    pub const fn needs_user(self) -> bool {
        matches!(self, Self::Cart | Self::Library | Self::Wishlist | Self::Favorites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browse_views_map_to_catalog_filters() {
        assert_eq!(View::OnSale.browse(), Some(BrowseView::OnSale));
        assert_eq!(View::Library.browse(), None);
        assert!(View::Cart.needs_user());
        assert!(!View::Home.needs_user());
    }
}
