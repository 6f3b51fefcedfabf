//! Reference to an uploaded image

/// Public URL of an uploaded image plus the object-store key used to delete it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRef {
    pub url: String,
    pub key: String,
}

impl PhotoRef {
    /// Build from the two nullable columns every photo-bearing table has.
    pub fn from_columns(url: Option<String>, key: Option<String>) -> Option<Self> {
        match (url, key) {
            (Some(url), Some(key)) => Some(Self { url, key }),
            (Some(url), None) => Some(Self {
                url,
                key: String::new(),
            }),
            _ => None,
        }
    }

    /// Split back into `(url, key)` columns.
    pub fn into_columns(photo: Option<Self>) -> (Option<String>, Option<String>) {
        match photo {
            Some(p) if p.key.is_empty() => (Some(p.url), None),
            Some(p) => (Some(p.url), Some(p.key)),
            None => (None, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_without_url_mean_no_photo() {
        assert_eq!(PhotoRef::from_columns(None, Some("k".into())), None);
        assert_eq!(PhotoRef::into_columns(None), (None, None));
    }

    #[test]
    fn url_without_key_is_kept() {
        let p = PhotoRef::from_columns(Some("http://x/y.png".into()), None).expect("photo");
        assert_eq!(p.key, "");
        assert_eq!(
            PhotoRef::into_columns(Some(p)),
            (Some("http://x/y.png".to_string()), None)
        );
    }
}
