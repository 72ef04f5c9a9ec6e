use std::fmt;
use std::sync::Arc;

use super::observability::{LoadObserver, LoadSeverity};

/// Options controlling how delimited text is split and which lines are read.
///
/// Use [`Default`] for common cases and override fields with struct-update syntax:
///
/// ```
/// use numeric_arrays::loading::LoadOptions;
///
/// let opts = LoadOptions {
///     skip_rows: 1,
///     ..Default::default()
/// };
/// assert_eq!(opts.delimiter, b',');
/// ```
#[derive(Clone)]
pub struct LoadOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Number of leading lines (e.g. headers) to discard before parsing.
    pub skip_rows: usize,
    /// Lines starting with this byte are ignored. `None` disables comment handling.
    pub comment: Option<u8>,
    /// Source column indexes to keep, in output order. `None` keeps every column.
    pub usecols: Option<Vec<usize>>,
    /// Trim surrounding whitespace from every field before parsing.
    pub trim: bool,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("delimiter", &char::from(self.delimiter))
            .field("skip_rows", &self.skip_rows)
            .field("comment", &self.comment.map(char::from))
            .field("usecols", &self.usecols)
            .field("trim", &self.trim)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            skip_rows: 0,
            comment: Some(b'#'),
            usecols: None,
            trim: true,
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}
