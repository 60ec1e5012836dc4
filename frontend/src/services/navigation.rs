use urlencoding::encode;

/// Preview route for a freshly generated bill.
pub fn preview_url(bill_id: &str, email: &str) -> String {
    format!("/preview/{}?email={}", bill_id, encode(email))
}

/// Purchase-history route for a customer. The email passes through
/// verbatim apart from URL encoding; no format check applies here.
pub fn purchases_url(email: &str) -> String {
    format!("/purchases?email={}", encode(email))
}

/// Point the browser at `url`. For the form this is a terminal action.
pub fn redirect_to(url: &str) {
    if let Some(window) = web_sys::window() {
        if window.location().set_href(url).is_err() {
            gloo::console::error!(format!("Failed to navigate to {}", url));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_url_encodes_email() {
        assert_eq!(preview_url("B1", "a@b.com"), "/preview/B1?email=a%40b.com");
    }

    #[test]
    fn test_purchases_url_encodes_email() {
        assert_eq!(purchases_url("a@b.com"), "/purchases?email=a%40b.com");
    }
}
