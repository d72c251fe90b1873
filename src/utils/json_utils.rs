use std::fs::File;
use std::io::{BufReader, BufWriter, Error, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub fn json_read_document<T: DeserializeOwned>(file: &Path) -> Result<T, Error> {
    let reader = BufReader::new(File::open(file)?);
    serde_json::from_reader(reader).map_err(Into::into)
}

pub fn json_write_document<T>(file: &Path, value: &T) -> Result<(), Error>
where
    T: ?Sized + Serialize,
{
    let mut writer = BufWriter::new(File::create(file)?);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()
}
