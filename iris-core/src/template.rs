//! Template location handling
//!
//! Templates are referenced by location and fetched by the infrastructure
//! service itself, which only accepts HTTPS URLs. `s3://` locations are
//! rewritten to the bucket's virtual-hosted URL.

const S3_SCHEME: &str = "s3://";

/// Resolves a template location into a URL the infrastructure service accepts
///
/// `s3://bucket/key` becomes `https://bucket.s3.amazonaws.com/key`; anything
/// else is returned unchanged.
pub fn resolve_template_url(location: &str) -> String {
    let Some(rest) = location.strip_prefix(S3_SCHEME) else {
        return location.to_string();
    };

    let (bucket, key) = rest.split_once('/').unwrap_or((rest, ""));
    format!("https://{}.s3.amazonaws.com/{}", bucket, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_s3_location_is_rewritten() {
        assert_eq!(
            resolve_template_url("s3://iris-templates/cfn/infra.yaml"),
            "https://iris-templates.s3.amazonaws.com/cfn/infra.yaml"
        );
    }

    #[test]
    fn test_bucket_only_location() {
        assert_eq!(
            resolve_template_url("s3://iris-templates"),
            "https://iris-templates.s3.amazonaws.com/"
        );
    }

    #[test]
    fn test_https_location_passes_through() {
        let url = "https://iris-templates.s3.eu-north-1.amazonaws.com/infra.yaml";
        assert_eq!(resolve_template_url(url), url);
    }
}
