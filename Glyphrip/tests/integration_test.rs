use glyphrip::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

const FEDORA: &str = r##"# This file is automatically generated. Please do not modify.

from . import AsciiArt

fedora = AsciiArt(match=r'''"Fedora"* | "RFRemix"*''', color='fg "#3c6eb4"', ascii=r"""
${c2}      _____
${c1}     /   __)${c2}\:
""")
"##;

const UBUNTU: &str = r#"
from . import AsciiArt

ubuntu = AsciiArt(match="ubuntu", color='1 7 3', ascii="""
${c1}    _
${c2}  (_)
""")
"#;

#[test]
fn test_art_directory_to_yaml() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("distros")).unwrap();
    fs::write(dir.path().join("distros/fedora.py"), FEDORA).unwrap();
    fs::write(dir.path().join("distros/ubuntu.py"), UBUNTU).unwrap();
    fs::write(dir.path().join("distros/__init__.py"), "from .x import y\n").unwrap();

    let options = ExtractOptions::default();
    let files = find_art_files(dir.path(), &options).unwrap();
    assert_eq!(files.len(), 3);

    let result = batch_extract_art(&files, dir.path(), &options, |_| {});
    assert_eq!(result.success_count, 2);
    assert_eq!(result.skip_count, 1);
    assert_eq!(result.fail_count, 0);

    let mut out = Vec::new();
    write_art(&result.records, ArtFormat::Yaml, &mut out).unwrap();
    let expected = concat!(
        "- name: ['Fedora', 'RFRemix']\n",
        "  width: 14\n",
        "  colors:\n",
        "    - Reset\n",
        "    - !Rgb\n",
        "      r: 60\n",
        "      g: 110\n",
        "      b: 180\n",
        "  art: |-\n",
        "    ${c2}      _____   \n",
        "    ${c1}     /   __)${c2}\\;\n",
        "- name: ['ubuntu']\n",
        "  width: 5\n",
        "  colors:\n",
        "    - !AnsiValue 1\n",
        "    - !AnsiValue 7\n",
        "    - !AnsiValue 3\n",
        "  art: |-\n",
        "    ${c1}    _\n",
        "    ${c2}  (_)\n",
    );
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

#[test]
fn test_art_json_output() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("fedora.py"), FEDORA).unwrap();

    let options = ExtractOptions::new().with_lowercase_names(true);
    let files = find_art_files(dir.path(), &options).unwrap();
    let result = batch_extract_art(&files, dir.path(), &options, |_| {});

    let mut out = Vec::new();
    write_art(&result.records, ArtFormat::Json, &mut out).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json[0]["name"], serde_json::json!(["fedora", "rfremix"]));
    assert_eq!(json[0]["width"], 14);
    assert_eq!(json[0]["colors"][0], "Reset");
    assert_eq!(json[0]["colors"][1]["Rgb"]["b"], 180);
}

#[test]
fn test_file_without_record_is_skipped() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("util.py");
    fs::write(&path, "def match(x):\n    return x\n").unwrap();

    let outcome = parse_art_file(&path, &ExtractOptions::default()).unwrap();
    assert!(matches!(outcome, ArtOutcome::Skipped(_)));
}

#[test]
fn test_presets_file_to_toml() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("presets.py");
    fs::write(
        &path,
        r#"from __future__ import annotations

from .color_util import ColorProfile

PRESETS: dict[str, ColorProfile] = {
    'rainbow': ColorProfile([
        '#E50000',
        '#FF8D00',
        '#FFEE00',
    ]),
    'transgender': ColorProfile([
        '#55CDFD',
        '#F6AAB7',
        '#FFFFFF',
        '#F6AAB7',
        '#55CDFD',
    ]),
    'beiyang': ColorProfile([
        '#DF1B12',
        '#FFC600',
    ]).with_weights([
        1, 2
    ]),
    'unknown': ColorProfile(some_function()),
}
"#,
    )
    .unwrap();

    let table = extract_presets_file(&path, &ExtractOptions::default()).unwrap();
    assert_eq!(table.failures.len(), 1);

    let mut out = Vec::new();
    write_presets(&table.to_map(), PresetFormat::Toml, &mut out).unwrap();
    let expected = r##"rainbow = ["#E50000", "#FF8D00", "#FFEE00"]
transgender = ["#55CDFD", "#F6AAB7", "#FFFFFF", "#F6AAB7", "#55CDFD"]
beiyang = ["#DF1B12", "#FFC600", "#FFC600"]
"##;
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

#[test]
fn test_options_from_config_file() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("glyphrip.toml");
    fs::write(&config, "binding_name = \"FLAGS\"\nstrict = true\n").unwrap();
    let options = ExtractOptions::from_toml_file(&config).unwrap();

    let host = dir.path().join("flags.py");
    fs::write(&host, "FLAGS = {'a': ['#1'], 'b': weird + 1}\n").unwrap();
    let err = extract_presets_file(&host, &options).unwrap_err();
    assert_eq!(err.stage(), "unsupported-expression");
    assert!(err.to_string().contains("entry 'b'"));
}
