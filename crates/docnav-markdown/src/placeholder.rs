//! Sources of placeholder image URLs.

use rand::RngExt;

/// Produces the URL substituted for each placeholder image.
pub trait PlaceholderSource: Send + Sync {
    /// URL for the next replaced image.
    fn next_url(&self) -> String;
}

/// Random placeholder photos from a URL template.
///
/// Every `{seed}` in the template receives the same fresh random number per
/// call, so each image gets a different photo.
#[derive(Debug, Clone)]
pub struct RandomPlaceholder {
    template: String,
}

impl RandomPlaceholder {
    /// Template placeholder substituted with a random number.
    pub const SEED: &'static str = "{seed}";

    /// Create a source from a URL template such as
    /// `https://picsum.photos/800/450?random={seed}`.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

impl PlaceholderSource for RandomPlaceholder {
    fn next_url(&self) -> String {
        let seed = rand::rng().random::<u64>();
        if self.template.contains(Self::SEED) {
            self.template.replace(Self::SEED, &seed.to_string())
        } else {
            // Cache-busting query keeps repeated images distinct.
            let sep = if self.template.contains('?') { '&' } else { '?' };
            format!("{}{sep}random={seed}", self.template)
        }
    }
}

/// Always returns the same URL.
#[derive(Debug, Clone)]
pub struct FixedPlaceholder {
    url: String,
}

impl FixedPlaceholder {
    /// Create a source returning `url` for every image.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl PlaceholderSource for FixedPlaceholder {
    fn next_url(&self) -> String {
        self.url.clone()
    }
}
