pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Duplicate cell id: {id}")]
    DuplicateId { id: String },

    #[error("Unknown cell id: {id}")]
    UnknownCell { id: String },

    #[error("Cell {id} is not attached to this model")]
    Detached { id: String },

    #[error("The model root cannot be removed; replace it with set_root instead")]
    CannotRemoveRoot,

    #[error("Cell {id} cannot be made a child of its own descendant {parent}")]
    CyclicParent { id: String, parent: String },
}
