//! Debug output collaborators for [`Collection::dump`](crate::Collection::dump)
//! and [`Collection::dd`](crate::Collection::dd).

/// Receives rendered dumps and exit requests.
pub trait Inspector {
    /// Receives a rendered dump.
    fn dump(&mut self, rendered: &str);

    /// Handles a request to stop the program with the given status.
    fn exit(&mut self, code: i32);
}

/// Emits dumps as `tracing` events and exits the process on request.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingInspector;

impl Inspector for TracingInspector {
    fn dump(&mut self, rendered: &str) {
        tracing::info!(target: "recollect::dump", "{rendered}");
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

/// Records dumps and exit requests instead of acting on them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingInspector {
    /// Every rendered dump, in order.
    pub dumps: Vec<String>,
    /// The last requested exit status.
    pub exit_code: Option<i32>,
}

impl Inspector for RecordingInspector {
    fn dump(&mut self, rendered: &str) {
        self.dumps.push(rendered.to_string());
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}
