use pulse_core::{Consumer, Snapshot};

/// Renders the full history as an aligned plain-text table, oldest first.
#[derive(Debug, Clone)]
pub struct ReadingsTable {
    decimals: usize,
}

impl ReadingsTable {
    pub fn new(decimals: usize) -> Self {
        Self { decimals }
    }
}

impl Consumer for ReadingsTable {
    fn id(&self) -> &str {
        "table"
    }

    fn render(&self, snapshot: &Snapshot) -> String {
        let [value_col, ts_col] = snapshot.table.columns;
        let mut lines = Vec::with_capacity(snapshot.table.rows.len() + 1);
        lines.push(format!("{:>3}  {value_col:>10}  {ts_col}", "#"));

        for row in &snapshot.table.rows {
            lines.push(format!(
                "{:>3}  {:>10.*}  {}",
                row.index, self.decimals, row.value, row.timestamp
            ));
        }
        lines.join("\n")
    }
}
