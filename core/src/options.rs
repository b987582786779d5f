/// Limits applied while decoding untrusted input.
///
/// # Example
///
/// ```
/// use ombu_core::DecodeOptions;
///
/// let options = DecodeOptions::default().with_max_depth(64).with_max_objects(10_000);
/// assert_eq!(options.max_depth, 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum number of compound values under construction at once.
    pub max_depth: usize,
    /// Maximum number of objects a payload may introduce.
    pub max_objects: Option<usize>,
}

impl DecodeOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 4096;

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_objects(mut self, max_objects: usize) -> Self {
        self.max_objects = Some(max_objects);
        self
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_objects: None,
        }
    }
}
