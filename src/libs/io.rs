use anyhow::Context;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Opens `input` for reading. `stdin` reads standard input, `.gz` files are
/// decompressed on the fly.
///
/// ```
/// use std::io::Write;
/// let mut file = tempfile::NamedTempFile::new().unwrap();
/// writeln!(file, "Tip\tGenus").unwrap();
/// writeln!(file, "Hyla_cinerea\tHyla").unwrap();
///
/// let reader = monophy::reader(file.path().to_str().unwrap()).unwrap();
/// use std::io::BufRead;
/// assert_eq!(reader.lines().count(), 2);
/// ```
pub fn reader(input: &str) -> anyhow::Result<Box<dyn BufRead>> {
    let reader: Box<dyn BufRead> = if input == "stdin" {
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        let path = Path::new(input);
        let file = std::fs::File::open(path)
            .with_context(|| format!("could not open {}", path.display()))?;

        if path.extension() == Some(std::ffi::OsStr::new("gz")) {
            Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        }
    };

    Ok(reader)
}

/// Reads the whole of `input` into a string.
pub fn read_to_string(input: &str) -> anyhow::Result<String> {
    let mut text = String::new();
    reader(input)?
        .read_to_string(&mut text)
        .with_context(|| format!("could not read {}", input))?;
    Ok(text)
}

/// Opens `output` for writing. `stdout` writes to standard output, anything
/// else is created or truncated.
pub fn writer(output: &str) -> anyhow::Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = if output == "stdout" {
        Box::new(BufWriter::new(std::io::stdout()))
    } else {
        let file = std::fs::File::create(output)
            .with_context(|| format!("could not create {}", output))?;
        Box::new(BufWriter::new(file))
    };

    Ok(writer)
}

/// Writes `content` to `dir/name`, replacing any previous file.
pub fn write_file(dir: &Path, name: &str, content: &str) -> anyhow::Result<()> {
    let path = dir.join(name);
    std::fs::write(&path, content)
        .with_context(|| format!("could not write {}", path.display()))?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}
