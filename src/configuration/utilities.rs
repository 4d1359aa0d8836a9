use std::{env::current_dir, fmt, marker::PhantomData, path::PathBuf};

use miette::{miette, Context, IntoDiagnostic, Result};
use serde::{
    de::{MapAccess, Visitor},
    Deserialize,
    Deserializer,
};


/// File name looked up in the current directory when no configuration path is given.
pub const DEFAULT_CONFIGURATION_FILE_NAME: &str = "deployconf.toml";


/// Returns the default configuration filepath, which is at
/// `{current directory}/deployconf.toml`.
pub fn get_default_configuration_file_path() -> Result<PathBuf> {
    let mut configuration_filepath = current_dir()
        .into_diagnostic()
        .wrap_err_with(|| miette!("Could not get the current directory."))?;
    configuration_filepath.push(DEFAULT_CONFIGURATION_FILE_NAME);

    if !configuration_filepath.exists() {
        return Err(miette!(
            "Could not find {} in the current directory.",
            DEFAULT_CONFIGURATION_FILE_NAME
        ));
    }

    Ok(configuration_filepath)
}



/// A table whose entries are kept in the order they were written in.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OrderedTable<T>(pub(crate) Vec<(String, T)>);

impl<T> Default for OrderedTable<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

struct OrderedTableVisitor<T> {
    marker: PhantomData<fn() -> OrderedTable<T>>,
}

impl<'de, T> Visitor<'de> for OrderedTableVisitor<T>
where
    T: Deserialize<'de>,
{
    type Value = OrderedTable<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a table of named entries")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));

        while let Some((key, value)) = access.next_entry::<String, T>()? {
            entries.push((key, value));
        }

        Ok(OrderedTable(entries))
    }
}

impl<'de, T> Deserialize<'de> for OrderedTable<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedTableVisitor {
            marker: PhantomData,
        })
    }
}
