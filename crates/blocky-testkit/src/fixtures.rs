//! Shared template and data fixtures
//!
//! The shopping list fixture exercises the whole engine at once: a sequence
//! rendered twice, alignment padding, a variant block driven by `vari_idx`
//! and first/standard/last separators.

use crate::write_file;
use std::path::{Path, PathBuf};

pub const SHOPLIST_TEMPLATE: &str = "\
<ITEMS>
* <ITEM><+>          <QTY><FLAG> (IMPORTANT)<^FLAG> (MAYBE)</FLAG>
</ITEMS>
Short list: <ITEMS><ITEM><.>, <^.></.></ITEMS>
";

pub const SHOPLIST_JSON: &str = r#"{
  "items": [
    { "flag": null, "item": "apples", "qty": "1 kg" },
    { "flag": { "vari_idx": 0 }, "item": "potatoes", "qty": "2 kg" },
    { "flag": { "vari_idx": 1 }, "item": "magazine", "qty": "1 pc" }
  ]
}"#;

pub const SHOPLIST_RENDERED: &str = "\
* apples             1 kg
* potatoes           2 kg (IMPORTANT)
* magazine           1 pc (MAYBE)
Short list: apples, potatoes, magazine
";

/// Paths of a shopping list fixture written to disk
#[derive(Debug, Clone)]
pub struct ShoplistFiles {
    pub template: PathBuf,
    pub data: PathBuf,
}

/// Write the shopping list template and JSON data into `dir`
pub fn write_shoplist(dir: &Path) -> ShoplistFiles {
    ShoplistFiles {
        template: write_file(dir, "shoplist.txt", SHOPLIST_TEMPLATE),
        data: write_file(dir, "shoplist.json", SHOPLIST_JSON),
    }
}
