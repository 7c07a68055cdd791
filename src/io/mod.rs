//! Redirectable destinations for verbose solver output.

use std::fs::File;
use std::io::{self, Write};

/// Destination of verbose solver output
#[derive(Default)]
pub enum PrintTarget {
    #[default]
    Stdout,
    File(File),
    /// in-memory buffer, read back with
    /// [`get_print_buffer`](ConfigurablePrintTarget::get_print_buffer)
    Buffer(Vec<u8>),
    Stream(Box<dyn Write + Send + Sync>),
    /// output is discarded
    Sink,
}

impl PrintTarget {
    fn name(&self) -> &'static str {
        match self {
            PrintTarget::Stdout => "stdout",
            PrintTarget::File(_) => "file",
            PrintTarget::Buffer(_) => "buffer",
            PrintTarget::Stream(_) => "stream",
            PrintTarget::Sink => "sink",
        }
    }
}

impl std::fmt::Debug for PrintTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PrintTarget({})", self.name())
    }
}

impl Write for PrintTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            PrintTarget::Stdout => io::stdout().lock().write(buf),
            PrintTarget::File(file) => file.write(buf),
            PrintTarget::Buffer(bytes) => bytes.write(buf),
            PrintTarget::Stream(stream) => stream.write(buf),
            PrintTarget::Sink => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            PrintTarget::Stdout => io::stdout().lock().flush(),
            PrintTarget::File(file) => file.flush(),
            PrintTarget::Stream(stream) => stream.flush(),
            PrintTarget::Buffer(_) | PrintTarget::Sink => Ok(()),
        }
    }
}

/// Redirection of verbose output.  Implementors only expose their
/// [`PrintTarget`]; the redirections are provided.
pub trait ConfigurablePrintTarget {
    fn print_target(&mut self) -> &mut PrintTarget;

    fn print_to_stdout(&mut self) {
        *self.print_target() = PrintTarget::Stdout;
    }

    fn print_to_file(&mut self, file: File) {
        *self.print_target() = PrintTarget::File(file);
    }

    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>) {
        *self.print_target() = PrintTarget::Stream(stream);
    }

    /// Collect output in memory.  Any earlier buffer is discarded.
    fn print_to_buffer(&mut self) {
        *self.print_target() = PrintTarget::Buffer(Vec::new());
    }

    fn print_to_sink(&mut self) {
        *self.print_target() = PrintTarget::Sink;
    }

    /// Everything written since [`print_to_buffer`](Self::print_to_buffer).
    /// Errors if output is not being buffered.
    fn get_print_buffer(&mut self) -> io::Result<String> {
        match self.print_target() {
            PrintTarget::Buffer(bytes) => Ok(String::from_utf8_lossy(bytes).into_owned()),
            other => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("output is not buffered (target is {})", other.name()),
            )),
        }
    }
}

impl ConfigurablePrintTarget for PrintTarget {
    fn print_target(&mut self) -> &mut PrintTarget {
        self
    }
}

#[test]
fn test_print_buffer() {
    let mut target = PrintTarget::default();
    assert!(target.get_print_buffer().is_err());

    target.print_to_buffer();
    write!(target, "hello").unwrap();
    writeln!(target, " world").unwrap();
    assert_eq!(target.get_print_buffer().unwrap(), "hello world\n");

    // switching target discards the buffer
    target.print_to_sink();
    writeln!(target, "gone").unwrap();
    assert!(target.get_print_buffer().is_err());
    assert_eq!(format!("{:?}", target), "PrintTarget(sink)");
}
