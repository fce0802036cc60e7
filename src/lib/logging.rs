//! Tracing subscriber setup. Browser builds write formatted events to the
//! devtools console; native builds write to stderr. `RUST_LOG` style
//! directives are honored natively, the configured level is the default.

use std::error::Error;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(verbosity_level: Level) -> Result<(), Box<dyn Error + Send + Sync>> {
    let filter = EnvFilter::builder()
        .with_default_directive(verbosity_level.into())
        .from_env_lossy();

    let builder = fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_target(false);

    #[cfg(target_arch = "wasm32")]
    let builder = builder
        .with_ansi(false)
        .without_time()
        .with_writer(console::MakeConsoleWriter);

    builder.try_init()
}

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io;
    use tracing_subscriber::fmt::MakeWriter;

    /// Buffers one formatted event and hands it to `console.log` on drop.
    #[derive(Default)]
    pub struct ConsoleWriter {
        buffer: Vec<u8>,
    }

    impl io::Write for ConsoleWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            let line = String::from_utf8_lossy(&self.buffer);
            let line = line.trim_end();
            if !line.is_empty() {
                web_sys::console::log_1(&line.into());
            }
        }
    }

    pub struct MakeConsoleWriter;

    impl<'a> MakeWriter<'a> for MakeConsoleWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter::default()
        }
    }
}
