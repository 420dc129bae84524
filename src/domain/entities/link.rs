//! Link entity representing a shortened URL mapping.

/// Sentinel stored for links created with a negative expiration.
pub const NEVER_EXPIRES: i64 = -1;

/// A shortened URL link.
///
/// `expiration_time` is a Unix timestamp in seconds. Any value `<= 0` means
/// the link never expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub url: String,
    pub short_path: String,
    pub expiration_time: i64,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(url: String, short_path: String, expiration_time: i64) -> Self {
        Self {
            url,
            short_path,
            expiration_time,
        }
    }

    /// Returns true if the link carries an expiry at all.
    pub fn expires(&self) -> bool {
        self.expiration_time > 0
    }

    /// Returns true if the link's expiry lies strictly before `now`.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires() && self.expiration_time < now
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub short_path: String,
    pub url: String,
    pub expiration_time: i64,
}

impl NewLink {
    /// Builds an insert payload, normalizing any negative expiration to [`NEVER_EXPIRES`].
    pub fn new(short_path: String, url: String, expiration_time: i64) -> Self {
        Self {
            short_path,
            url,
            expiration_time: normalize_expiration(expiration_time),
        }
    }
}

/// Maps negative expirations to [`NEVER_EXPIRES`]; zero and positive values pass through.
pub fn normalize_expiration(expiration_time: i64) -> i64 {
    if expiration_time < 0 {
        NEVER_EXPIRES
    } else {
        expiration_time
    }
}

impl From<NewLink> for Link {
    fn from(new_link: NewLink) -> Self {
        Link::new(
            new_link.url,
            new_link.short_path,
            new_link.expiration_time,
        )
    }
}
