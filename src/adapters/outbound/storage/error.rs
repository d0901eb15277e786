use crate::domain::errors::StorageError;

impl From<StorageError> for http::StatusCode {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ContainerNotFound { .. } | StorageError::ObjectNotFound { .. } => {
                http::StatusCode::NOT_FOUND
            }
            StorageError::InvalidDestination { .. } => http::StatusCode::PRECONDITION_FAILED,
            StorageError::Backend { .. } => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Convert object_store errors to domain storage errors
impl From<object_store::Error> for StorageError {
    fn from(err: object_store::Error) -> Self {
        match err {
            object_store::Error::NotFound { path, .. } => StorageError::ObjectNotFound { path },
            e => StorageError::Backend {
                message: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let missing_container = StorageError::ContainerNotFound {
            account: "acct".to_string(),
            container: ".trash-pics".to_string(),
        };
        assert_eq!(StatusCode::from(missing_container), StatusCode::NOT_FOUND);

        let bad_destination = StorageError::InvalidDestination {
            destination: "no-slash".to_string(),
        };
        assert_eq!(
            StatusCode::from(bad_destination),
            StatusCode::PRECONDITION_FAILED
        );

        let backend = StorageError::Backend {
            message: "disk full".to_string(),
        };
        assert_eq!(
            StatusCode::from(backend),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_object_store_not_found() {
        let err = object_store::Error::NotFound {
            path: "acct/pics/cat.jpg".to_string(),
            source: "missing".into(),
        };
        assert_eq!(
            StorageError::from(err),
            StorageError::ObjectNotFound {
                path: "acct/pics/cat.jpg".to_string()
            }
        );
    }
}
