/// An object-level request path: `/<version>/<account>/<container>/<object...>`.
///
/// The path is split on literal `/` first and each segment is then
/// percent-decoded, so the fields hold the names the backend stores. A
/// decoded container may therefore contain `/` (sent as `%2F`). The object
/// segment may contain further `/` separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectPath {
    pub version: String,
    pub account: String,
    pub container: String,
    pub object: String,
}

impl ObjectPath {
    /// Decompose a request path, returning `None` for anything that is not an
    /// object path (too few segments, missing leading slash, empty segment)
    /// or whose escapes do not decode to UTF-8.
    pub fn parse(path: &str) -> Option<Self> {
        let rest = path.strip_prefix('/')?;
        let mut segments = rest.splitn(4, '/');

        let version = segments.next()?;
        let account = segments.next()?;
        let container = segments.next()?;
        let object = segments.next()?;

        if [version, account, container, object]
            .iter()
            .any(|segment| segment.is_empty())
        {
            return None;
        }

        Some(Self {
            version: decode(version)?,
            account: decode(account)?,
            container: decode(container)?,
            object: decode(object)?,
        })
    }
}

fn decode(segment: &str) -> Option<String> {
    urlencoding::decode(segment).ok().map(|decoded| decoded.into_owned())
}

impl std::fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "/{}/{}/{}/{}",
            self.version, self.account, self.container, self.object
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_path() {
        let path = ObjectPath::parse("/v1/acct/pics/cat.jpg").unwrap();
        assert_eq!(path.version, "v1");
        assert_eq!(path.account, "acct");
        assert_eq!(path.container, "pics");
        assert_eq!(path.object, "cat.jpg");
        assert_eq!(path.to_string(), "/v1/acct/pics/cat.jpg");
    }

    #[test]
    fn test_object_keeps_embedded_slashes() {
        let path = ObjectPath::parse("/v1/acct/pics/2024/summer/cat.jpg").unwrap();
        assert_eq!(path.container, "pics");
        assert_eq!(path.object, "2024/summer/cat.jpg");

        let path = ObjectPath::parse("/v1/acct/pics//leading").unwrap();
        assert_eq!(path.object, "/leading");

        let path = ObjectPath::parse("/v1/acct/pics/dir/").unwrap();
        assert_eq!(path.object, "dir/");
    }

    #[test]
    fn test_segments_are_percent_decoded() {
        let path = ObjectPath::parse("/v1/acct/%2Etrash-pics/a%20b.txt").unwrap();
        assert_eq!(path.container, ".trash-pics");
        assert_eq!(path.object, "a b.txt");

        let path = ObjectPath::parse("/v1/acct/a%2Fb/cat.jpg").unwrap();
        assert_eq!(path.container, "a/b");
        assert_eq!(path.object, "cat.jpg");

        let path = ObjectPath::parse("/v1/acct/pics/2024%2Fcat%25.jpg").unwrap();
        assert_eq!(path.object, "2024/cat%.jpg");
    }

    #[test]
    fn test_undecodable_paths_are_not_object_paths() {
        assert!(ObjectPath::parse("/v1/acct/%FF/cat.jpg").is_none());
        assert!(ObjectPath::parse("/v1/acct/pics/%C3").is_none());
    }

    #[test]
    fn test_non_object_paths() {
        assert!(ObjectPath::parse("").is_none());
        assert!(ObjectPath::parse("/").is_none());
        assert!(ObjectPath::parse("/v1").is_none());
        assert!(ObjectPath::parse("/v1/acct").is_none());
        assert!(ObjectPath::parse("/v1/acct/pics").is_none());
        assert!(ObjectPath::parse("/v1/acct/pics/").is_none());
        assert!(ObjectPath::parse("v1/acct/pics/cat.jpg").is_none());
        assert!(ObjectPath::parse("/v1//pics/cat.jpg").is_none());
        assert!(ObjectPath::parse("//acct/pics/cat.jpg").is_none());
    }
}
