use crate::errors::ClickshotError;

#[derive(Debug, thiserror::Error)]
pub enum RegionError {
    #[error("Region '{region}' has no element '{element}'. Available: {available}")]
    UnknownElement {
        region: String,
        element: String,
        available: String,
    },

    #[error("No region named '{region}'. Available: {available}")]
    UnknownRegion { region: String, available: String },

    #[error("Region '{region}' is configured twice")]
    DuplicateRegion { region: String },

    #[error("Element '{element}' is configured twice in region '{region}'")]
    DuplicateElement { region: String, element: String },

    #[error("Element '{element}' in region '{region}' has an empty expected_rect")]
    EmptyRect { region: String, element: String },

    #[error("Invalid element path '{path}': expected <region>.<element>")]
    InvalidPath { path: String },
}

impl ClickshotError for RegionError {
    fn error_code(&self) -> &'static str {
        match self {
            RegionError::UnknownElement { .. } => "REGION_UNKNOWN_ELEMENT",
            RegionError::UnknownRegion { .. } => "REGION_UNKNOWN_REGION",
            RegionError::DuplicateRegion { .. } => "REGION_DUPLICATE_REGION",
            RegionError::DuplicateElement { .. } => "REGION_DUPLICATE_ELEMENT",
            RegionError::EmptyRect { .. } => "REGION_EMPTY_RECT",
            RegionError::InvalidPath { .. } => "REGION_INVALID_PATH",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}
