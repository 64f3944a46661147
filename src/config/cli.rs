use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

/// Reads from a file or stdin and writes to a file or stdout.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
}

impl LocalStorage {
    pub fn new(input: Option<String>, output: Option<String>) -> Self {
        Self {
            input: input.map(PathBuf::from),
            output: output.map(PathBuf::from),
        }
    }
}

impl Storage for LocalStorage {
    fn read_input(&self) -> Result<Vec<u8>> {
        match &self.input {
            Some(path) => Ok(fs::read(path)?),
            None => {
                let mut data = Vec::new();
                io::stdin().lock().read_to_end(&mut data)?;
                Ok(data)
            }
        }
    }

    fn write_output(&self, data: &[u8]) -> Result<()> {
        match &self.output {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(path, data)?;
            }
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(data)?;
                stdout.write_all(b"\n")?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}
