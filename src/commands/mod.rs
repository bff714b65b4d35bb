pub type CmdResult<T> = transform_files::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    /// Emit a JSON envelope instead of progress lines.
    pub json: bool,
}

pub mod transform;
