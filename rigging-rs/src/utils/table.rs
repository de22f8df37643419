//! Table output for mapping listings

use prettytable::{Cell, Row, Table};
use rig_anim::BoneAttachmentMapping;

use super::format::format_node;

/// Create a bold-titled table
pub fn create_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_format(*prettytable::format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).style_spec("b"))
        .collect();
    table.set_titles(Row::new(header_cells));

    table
}

/// Table with one row per mapping, in store order
pub fn mapping_table<'a>(mappings: impl IntoIterator<Item = &'a BoneAttachmentMapping>) -> Table {
    let mut table = create_table(&[
        "#",
        "Root model",
        "Root animation",
        "Attached model",
        "Attached animation",
        "Node",
    ]);

    for (index, mapping) in mappings.into_iter().enumerate() {
        table.add_row(Row::new(vec![
            Cell::new(&index.to_string()).style_spec("r"),
            Cell::new(&mapping.root_model),
            Cell::new(&mapping.root_animation),
            Cell::new(&mapping.attached_model),
            Cell::new(&mapping.attached_animation),
            Cell::new(&format_node(mapping.attach_to_node)).style_spec("r"),
        ]));
    }

    table
}
