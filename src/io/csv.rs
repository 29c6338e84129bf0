//! CSV input: read a delimited file into a raw text grid.

use std::path::Path;

use crate::error::CleanResult;
use crate::types::Cell;

/// Read a CSV file into a raw grid of cells.
///
/// Every record becomes a grid row, including the first one — header discovery happens
/// later, in [`crate::clean::columns::resolve_header`]. Empty fields map to
/// [`Cell::Empty`]; everything else is kept verbatim as text. Records may have uneven
/// lengths; [`crate::clean::columns::table_from_grid`] pads them.
pub fn read_csv_grid_from_path(path: impl AsRef<Path>) -> CleanResult<Vec<Vec<Cell>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    read_csv_grid_from_reader(&mut rdr)
}

/// Read a raw grid from an existing CSV reader.
///
/// The reader must be built with `has_headers(false)`, otherwise the `csv` crate eats
/// the first record before this function sees it.
pub fn read_csv_grid_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
) -> CleanResult<Vec<Vec<Cell>>> {
    let mut grid: Vec<Vec<Cell>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        grid.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::read_csv_grid_from_reader;
    use crate::types::Cell;

    #[test]
    fn reads_all_records_including_the_first() {
        let input = "Tag,Hours\n8760,10\n,5\n";
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(input.as_bytes());

        let grid = read_csv_grid_from_reader(&mut rdr).unwrap();
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[0][0], Cell::Text("Tag".to_string()));
        assert_eq!(grid[1][1], Cell::Text("10".to_string()));
        assert_eq!(grid[2][0], Cell::Empty);
    }

    #[test]
    fn tolerates_uneven_record_lengths() {
        let input = "a,b,c\nonly-one\n";
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(input.as_bytes());

        let grid = read_csv_grid_from_reader(&mut rdr).unwrap();
        assert_eq!(grid[0].len(), 3);
        assert_eq!(grid[1].len(), 1);
    }
}
