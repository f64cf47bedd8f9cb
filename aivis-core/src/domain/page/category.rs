// aivis-core/src/domain/page/category.rs

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Page classification supplied by the external category classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum PageCategory {
    Homepage,
    BlogArticle,
    ProductPage,
    CategoryPage,
    LandingPage,
    Documentation,
    Guide,
    Faq,
    AboutPage,
    ContactPage,
    #[default]
    Uncategorized,
}

impl PageCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Homepage => "homepage",
            Self::BlogArticle => "blog_article",
            Self::ProductPage => "product_page",
            Self::CategoryPage => "category_page",
            Self::LandingPage => "landing_page",
            Self::Documentation => "documentation",
            Self::Guide => "guide",
            Self::Faq => "faq",
            Self::AboutPage => "about_page",
            Self::ContactPage => "contact_page",
            Self::Uncategorized => "uncategorized",
        }
    }

    /// Total parse: labels the classifier may emit that we do not know
    /// become `Uncategorized`.
    pub fn from_label(label: &str) -> Self {
        let normalized = label.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "homepage" | "home" | "home_page" => Self::Homepage,
            "blog_article" | "blog" | "article" | "blog_post" => Self::BlogArticle,
            "product_page" | "product" => Self::ProductPage,
            "category_page" | "category" | "collection" => Self::CategoryPage,
            "landing_page" | "landing" => Self::LandingPage,
            "documentation" | "docs" => Self::Documentation,
            "guide" | "how_to" | "tutorial" => Self::Guide,
            "faq" | "faq_page" => Self::Faq,
            "about_page" | "about" => Self::AboutPage,
            "contact_page" | "contact" => Self::ContactPage,
            _ => Self::Uncategorized,
        }
    }
}

impl fmt::Display for PageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl<'de> Deserialize<'de> for PageCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label
            .as_deref()
            .map(PageCategory::from_label)
            .unwrap_or_default())
    }
}

impl Serialize for PageCategory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
