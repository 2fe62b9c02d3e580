use super::table::Table;

/// Reserved property name that never becomes a dynamic column.
const RESERVED_NAME: &str = "ID";

/// A peptide identifier with an ordered list of named property values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyRecord {
    pub id: String,
    properties: Vec<(String, String)>,
}

impl PropertyRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            properties: Vec::new(),
        }
    }

    /// Sets a property. A repeated name overwrites the earlier value in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.properties.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.properties.push((name, value)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut String> {
        self.properties
            .iter_mut()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

fn is_dynamic_name(name: &str) -> bool {
    let name = name.trim();
    !name.is_empty() && !name.eq_ignore_ascii_case(RESERVED_NAME)
}

/// Accumulates records into a [`Table`] whose dynamic columns follow first-seen order.
///
/// Base columns are fixed up front; dynamic names that collide with a base column
/// are dropped so a record can never overwrite the peptide identity.
#[derive(Debug, Clone)]
pub struct PropertyTable {
    table: Table,
    base_width: usize,
    pending: Vec<(Vec<String>, PropertyRecord)>,
}

impl PropertyTable {
    pub fn new<I, S>(name: &str, base_columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let table = Table::new(name, base_columns);
        let base_width = table.width();
        Self {
            table,
            base_width,
            pending: Vec::new(),
        }
    }

    /// Builds a table from records alone, with `Peptide ID` as its only base column.
    pub fn from_records<'a, I>(name: &str, records: I) -> Table
    where
        I: IntoIterator<Item = &'a PropertyRecord>,
    {
        let mut builder = Self::new(name, [super::columns::PEPTIDE_ID]);
        for record in records {
            builder.push(vec![record.id.clone()], record.clone());
        }
        builder.into_table()
    }

    /// Queues one row: the base cell values in base column order, plus its properties.
    pub fn push(&mut self, base_values: Vec<String>, record: PropertyRecord) {
        for (name, _) in record.properties() {
            if is_dynamic_name(name) && !self.table.has_column(name) {
                self.table.add_column(name);
            }
        }
        self.pending.push((base_values, record));
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn into_table(self) -> Table {
        let Self {
            mut table,
            base_width,
            pending,
        } = self;
        for (mut base_values, record) in pending {
            base_values.resize(base_width, String::new());
            let mut row = base_values;
            row.resize(table.width(), String::new());
            for (name, value) in record.properties() {
                if !is_dynamic_name(name) {
                    continue;
                }
                if let Some(position) = table.column_index(name) {
                    if position >= base_width {
                        row[position] = value.to_string();
                    }
                }
            }
            table.push_row(row);
        }
        table
    }
}
