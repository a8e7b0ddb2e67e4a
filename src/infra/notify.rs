//! Terminal rendering of notices.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, warn};

use crate::application::notify::{Notice, NoticeKind, Notifier};
use crate::presentation::views::render_notice;

/// Writes each notice as one line, stderr by default.
pub struct TerminalNotifier {
    out: Mutex<Box<dyn Write + Send>>,
}

impl TerminalNotifier {
    pub fn stderr() -> Self {
        Self::new(Box::new(io::stderr()))
    }

    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        let kind = match notice.kind {
            NoticeKind::Success => "success",
            NoticeKind::Failure => "failure",
        };
        debug!(kind, title = %notice.title, description = %notice.description, "notice");

        let line = render_notice(&notice);
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            warn!(error = %err, "failed to write notice");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn notices_render_one_line_each() {
        let buf = SharedBuf::default();
        let notifier = TerminalNotifier::new(Box::new(buf.clone()));

        notifier.notify(Notice::success("Blog post created successfully"));
        notifier.notify(Notice::failure("Failed to delete blog post"));

        let text = String::from_utf8(buf.0.lock().expect("lock").clone()).expect("utf8");
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "[success] Success: Blog post created successfully",
                "[failure] Error: Failed to delete blog post",
            ]
        );
    }

    #[test]
    fn poisoned_writer_still_gets_the_notice() {
        let buf = SharedBuf::default();
        let notifier = Arc::new(TerminalNotifier::new(Box::new(buf.clone())));

        let holder = Arc::clone(&notifier);
        let outcome = thread::spawn(move || {
            let _guard = holder.out.lock().expect("lock");
            panic!("writer panicked mid-notice");
        })
        .join();
        assert!(outcome.is_err());
        assert!(notifier.out.is_poisoned());

        notifier.notify(Notice::failure("Failed to update blog post"));

        let text = String::from_utf8(buf.0.lock().expect("lock").clone()).expect("utf8");
        assert_eq!(text, "[failure] Error: Failed to update blog post\n");
    }
}
