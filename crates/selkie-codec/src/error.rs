pub type Result<T> = std::result::Result<T, CodecError>;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Invalid {attribute} supplied on <{element}>: `{value}`")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
    },

    #[error("<{element}> is missing its `{attribute}` attribute")]
    MissingAttribute { element: String, attribute: String },

    #[error("<{element}> is missing its required <{child}> child")]
    MissingChild { element: String, child: String },

    #[error("Unexpected <{element}> while decoding {context}")]
    UnexpectedElement { element: String, context: String },

    #[error(transparent)]
    Model(#[from] selkie_model::ModelError),
}
