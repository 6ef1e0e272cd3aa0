//! Products
//!
//! Product kinds, their kind-specific attributes, and the customization a
//! shopper may attach to a cart line.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Image shown when a product has none.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/600x400.png";

/// Product kind discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    /// Shipped goods with optional colour/size variants.
    Physical,

    /// Shipped goods the shopper personalises with an image or text.
    Customized,

    /// A downloadable file.
    Digital,
}

impl ProductKind {
    /// Storage/wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Physical => "physical",
            Self::Customized => "customized",
            Self::Digital => "digital",
        }
    }

    /// Whether orders containing this kind need a shipping address.
    #[must_use]
    pub const fn requires_shipping(self) -> bool {
        matches!(self, Self::Physical | Self::Customized)
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a [`ProductKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown product kind: {0}")]
pub struct UnknownProductKind(pub String);

impl FromStr for ProductKind {
    type Err = UnknownProductKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "physical" => Ok(Self::Physical),
            "customized" => Ok(Self::Customized),
            "digital" => Ok(Self::Digital),
            other => Err(UnknownProductKind(other.to_string())),
        }
    }
}

/// A product image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    /// Hosted image URL.
    pub url: String,

    /// Alt text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,

    /// Colour variant this image depicts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Whether this is the listing image.
    #[serde(default)]
    pub is_primary: bool,
}

/// URL of the primary image, falling back to the first image and then a placeholder.
pub fn primary_image_url(images: &[ProductImage]) -> &str {
    images
        .iter()
        .find(|image| image.is_primary)
        .or_else(|| images.first())
        .map_or(PLACEHOLDER_IMAGE_URL, |image| image.url.as_str())
}

/// Colour and size choices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variants {
    /// Selectable colours.
    #[serde(default)]
    pub colors: Vec<String>,

    /// Selectable sizes.
    #[serde(default)]
    pub sizes: Vec<String>,
}

/// Where an overlay sits on the product preview, in percent of width/height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Horizontal position.
    pub x: f32,

    /// Vertical position.
    pub y: f32,

    /// Scale (image) or font size (text).
    pub scale: f32,
}

/// Customization options offered by a customizable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomizationOptions {
    /// Shopper may upload an image.
    #[serde(default)]
    pub allow_image_upload: bool,

    /// Instructions shown next to the editor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,

    /// Shopper may add overlay text.
    #[serde(default)]
    pub allow_text: bool,

    /// Label for the text field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_label: Option<String>,

    /// Maximum overlay text length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_max_length: Option<u16>,

    /// Initial image placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_image_placement: Option<Placement>,

    /// Initial text placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_text_placement: Option<Placement>,
}

/// Kind-specific product attributes; exactly one set per product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductSpecifics {
    /// Physical goods.
    Physical {
        /// Colour and size choices.
        #[serde(flatten)]
        variants: Variants,
    },

    /// Customizable goods.
    Customized {
        /// Colour and size choices.
        #[serde(flatten)]
        variants: Variants,

        /// Personalisation options.
        options: CustomizationOptions,
    },

    /// Downloadable goods.
    Digital {
        /// File format label, e.g. `PDF`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file_format: Option<String>,

        /// Where the buyer downloads the file.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        download_url: Option<String>,
    },
}

impl ProductSpecifics {
    /// The discriminator for these attributes.
    #[must_use]
    pub const fn kind(&self) -> ProductKind {
        match self {
            Self::Physical { .. } => ProductKind::Physical,
            Self::Customized { .. } => ProductKind::Customized,
            Self::Digital { .. } => ProductKind::Digital,
        }
    }

    /// Download URL for digital products.
    pub fn download_url(&self) -> Option<&str> {
        match self {
            Self::Digital { download_url, .. } => download_url.as_deref(),
            Self::Physical { .. } | Self::Customized { .. } => None,
        }
    }

    fn variants(&self) -> Option<&Variants> {
        match self {
            Self::Physical { variants } | Self::Customized { variants, .. } => Some(variants),
            Self::Digital { .. } => None,
        }
    }

    /// Check a shopper's customization against what this product offers.
    ///
    /// # Errors
    ///
    /// Returns the first mismatch found.
    pub fn check_customization(
        &self,
        customization: &Customization,
    ) -> Result<(), CustomizationError> {
        let variants = self.variants();

        if let Some(color) = &customization.selected_color
            && !variants.is_some_and(|variants| variants.colors.contains(color))
        {
            return Err(CustomizationError::UnknownColor(color.clone()));
        }

        if let Some(size) = &customization.selected_size
            && !variants.is_some_and(|variants| variants.sizes.contains(size))
        {
            return Err(CustomizationError::UnknownSize(size.clone()));
        }

        let options = match self {
            Self::Customized { options, .. } => Some(options),
            Self::Physical { .. } | Self::Digital { .. } => None,
        };

        if customization.image_data_uri.is_some()
            && !options.is_some_and(|options| options.allow_image_upload)
        {
            return Err(CustomizationError::ImageNotAllowed);
        }

        if let Some(text) = &customization.text {
            let Some(options) = options.filter(|options| options.allow_text) else {
                return Err(CustomizationError::TextNotAllowed);
            };

            if let Some(max) = options.text_max_length
                && text.chars().count() > usize::from(max)
            {
                return Err(CustomizationError::TextTooLong { max });
            }
        }

        Ok(())
    }
}

/// A rejected customization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustomizationError {
    /// Colour not offered.
    #[error("colour {0:?} is not available")]
    UnknownColor(String),

    /// Size not offered.
    #[error("size {0:?} is not available")]
    UnknownSize(String),

    /// Product does not accept image uploads.
    #[error("this product does not accept an uploaded image")]
    ImageNotAllowed,

    /// Product does not accept overlay text.
    #[error("this product does not accept custom text")]
    TextNotAllowed,

    /// Overlay text is too long.
    #[error("custom text must be at most {max} characters")]
    TextTooLong {
        /// Maximum length.
        max: u16,
    },
}

/// Per-line personalisation chosen by the shopper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customization {
    /// Chosen colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,

    /// Chosen size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<String>,

    /// Uploaded image as a data URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data_uri: Option<String>,

    /// Uploaded image placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_placement: Option<Placement>,

    /// Overlay text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Overlay text placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_placement: Option<Placement>,
}

impl Customization {
    /// Drop blank fields and non-finite placements; `None` if nothing is left.
    ///
    /// Two lines carrying the same product merge only when their normalised
    /// customizations are equal.
    #[must_use]
    pub fn normalized(self) -> Option<Self> {
        let normalized = Self {
            selected_color: non_blank(self.selected_color),
            selected_size: non_blank(self.selected_size),
            image_data_uri: non_blank(self.image_data_uri),
            image_placement: self.image_placement.filter(Placement::is_finite),
            text: non_blank(self.text),
            text_placement: self.text_placement.filter(Placement::is_finite),
        };

        (normalized != Self::default()).then_some(normalized)
    }
}

impl Placement {
    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.scale.is_finite()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
