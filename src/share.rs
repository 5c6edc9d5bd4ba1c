use url::Url;

/// Social platforms the share buttons link out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareTarget {
    Facebook,
    Twitter,
    Line,
}

impl ShareTarget {
    /// Platform name shown in the share UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            ShareTarget::Facebook => "Facebook",
            ShareTarget::Twitter => "Twitter",
            ShareTarget::Line => "LINE",
        }
    }

    fn endpoint(&self) -> &'static str {
        match self {
            ShareTarget::Facebook => "https://www.facebook.com/sharer/sharer.php",
            ShareTarget::Twitter => "https://twitter.com/intent/tweet",
            ShareTarget::Line => "https://social-plugins.line.me/lineit/share",
        }
    }
}

/// Build the share URL for `target`, pointing at `page_url` with `title` as
/// the prefilled text where the platform accepts one. Query values are
/// percent-encoded.
pub fn share_url(target: ShareTarget, page_url: &str, title: &str) -> Result<Url, String> {
    let mut url = Url::parse(target.endpoint()).map_err(|e| e.to_string())?;

    {
        let mut query = url.query_pairs_mut();
        match target {
            ShareTarget::Facebook => {
                query.append_pair("u", page_url);
            }
            ShareTarget::Twitter | ShareTarget::Line => {
                query.append_pair("url", page_url);
                query.append_pair("text", title);
            }
        }
    }

    Ok(url)
}
