use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

fn main() {
    let levels_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../levels");
    println!("cargo:rerun-if-changed={}", levels_dir.display());

    let table = level_table(&level_names(&levels_dir));
    let dest = Path::new(&env::var("OUT_DIR").unwrap()).join("levels.rs");
    if fs::read_to_string(&dest).ok().as_deref() != Some(table.as_str()) {
        fs::write(&dest, table).unwrap();
    }
}

/// Stems of the `.txt` files in `dir`, sorted so main levels come out in
/// play order.
fn level_names(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|e| e == "txt"))
        .filter_map(|path| {
            println!("cargo:rerun-if-changed={}", path.display());
            Some(path.file_stem()?.to_str()?.to_string())
        })
        .collect();
    names.sort();
    names
}

fn level_table(names: &[String]) -> String {
    let mut code = String::from("pub(crate) static LEVEL_DATA: &[(&str, &str)] = &[\n");
    for name in names {
        writeln!(
            code,
            "    ({name:?}, include_str!(concat!(env!(\"CARGO_MANIFEST_DIR\"), \"/../levels/{name}.txt\"))),"
        )
        .unwrap();
    }
    code.push_str("];\n");
    code
}
