use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use rf::errors::Result;
use rf::exec::{BuildExecutor, ExitCode};
use rf::script::Script;

/// A fake executor that:
/// - records the rendered text of every script it is given
/// - immediately reports a fixed exit code.
#[derive(Debug, Clone, Default)]
pub struct FakeExecutor {
    scripts: Arc<Mutex<Vec<String>>>,
    exit_code: ExitCode,
}

impl FakeExecutor {
    pub fn new(exit_code: ExitCode) -> Self {
        Self {
            scripts: Arc::default(),
            exit_code,
        }
    }

    /// Scripts received so far.
    pub fn scripts(&self) -> Vec<String> {
        self.scripts.lock().unwrap().clone()
    }
}

impl BuildExecutor for FakeExecutor {
    fn execute<'a>(
        &'a mut self,
        script: &'a Script,
    ) -> Pin<Box<dyn Future<Output = Result<ExitCode>> + Send + 'a>> {
        let text = script.to_string();
        let scripts = Arc::clone(&self.scripts);
        let code = self.exit_code;

        Box::pin(async move {
            scripts.lock().unwrap().push(text);
            Ok(code)
        })
    }
}
