use std::collections::HashSet;

use crate::domain::entities::run::TableNaming;

pub const UNDEFINED_IDENTIFIER: &str = "Undefined";

/// Latin spelling of a Cyrillic letter, or `None` for anything else.
fn latin_for(ch: char) -> Option<&'static str> {
    let latin = match ch {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' => "",
        'ы' => "y",
        'ь' => "",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        'А' => "A",
        'Б' => "B",
        'В' => "V",
        'Г' => "G",
        'Д' => "D",
        'Е' => "E",
        'Ё' => "Yo",
        'Ж' => "Zh",
        'З' => "Z",
        'И' => "I",
        'Й' => "Y",
        'К' => "K",
        'Л' => "L",
        'М' => "M",
        'Н' => "N",
        'О' => "O",
        'П' => "P",
        'Р' => "R",
        'С' => "S",
        'Т' => "T",
        'У' => "U",
        'Ф' => "F",
        'Х' => "H",
        'Ц' => "Ts",
        'Ч' => "Ch",
        'Ш' => "Sh",
        'Щ' => "Sch",
        'Ъ' => "",
        'Ы' => "Y",
        'Ь' => "",
        'Э' => "E",
        'Ю' => "Yu",
        'Я' => "Ya",
        _ => return None,
    };
    Some(latin)
}

/// Turns arbitrary text into an identifier matching `[A-Za-z_][A-Za-z0-9_]*`.
///
/// Cyrillic letters are spelled out in Latin, every other character outside
/// `[A-Za-z0-9]` becomes `_`, underscore runs collapse to one and are trimmed
/// from both ends. Blank results fall back to [`UNDEFINED_IDENTIFIER`] and a
/// leading digit gets a `T_` prefix.
pub fn transliterate(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return UNDEFINED_IDENTIFIER.to_string();
    }

    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if let Some(latin) = latin_for(ch) {
            out.push_str(latin);
        } else if ch.is_ascii_alphanumeric() {
            out.push(ch);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }

    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() {
        return UNDEFINED_IDENTIFIER.to_string();
    }
    if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("T_{trimmed}");
    }
    trimmed.to_string()
}

/// Identifier for the column at `index`; blank names become `Column_<index>`.
pub fn resolve_column_identifier(original_name: &str, index: usize) -> String {
    let identifier = transliterate(original_name);
    if identifier.trim().is_empty() || identifier == UNDEFINED_IDENTIFIER {
        format!("Column_{index}")
    } else {
        identifier
    }
}

/// Identifiers for every column of a table, in column order.
pub fn resolve_column_identifiers(columns: &[String], dedupe: bool) -> Vec<String> {
    let resolved = columns
        .iter()
        .enumerate()
        .map(|(idx, name)| resolve_column_identifier(name, idx))
        .collect::<Vec<_>>();
    if dedupe {
        dedupe_identifiers(resolved)
    } else {
        resolved
    }
}

/// Repeated identifiers get `_2`, `_3`, ... in order of appearance.
/// Comparison is case-insensitive because SQL Server identifiers are.
pub fn dedupe_identifiers(identifiers: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut result = Vec::with_capacity(identifiers.len());

    for base in identifiers {
        let mut candidate = base.clone();
        let mut n = 1;
        while !seen.insert(candidate.to_lowercase()) {
            n += 1;
            candidate = format!("{base}_{n}");
        }
        result.push(candidate);
    }

    result
}

/// Table name for the `position`-th non-empty table read from `file_stem`.
pub fn table_name_for(file_stem: &str, position: usize, naming: TableNaming) -> String {
    let base = transliterate(file_stem);
    match naming {
        TableNaming::Shared => base,
        TableNaming::Indexed if position == 0 => base,
        TableNaming::Indexed => format!("{base}_{}", position + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spells_out_cyrillic() {
        assert_eq!(transliterate("Рейтинг компании"), "Reyting_kompanii");
        assert_eq!(transliterate("Щука и ёж"), "Schuka_i_yozh");
        assert_eq!(transliterate("объём"), "obyom");
    }

    #[test]
    fn soft_and_hard_signs_vanish_without_breaking_underscores() {
        assert_eq!(transliterate("a ъ b"), "a_b");
        assert_eq!(transliterate("ЪЬ"), UNDEFINED_IDENTIFIER);
    }

    #[test]
    fn dedupe_suffixes_repeats() {
        let ids = vec![
            "Name".to_string(),
            "Name".to_string(),
            "name".to_string(),
            "Name_2".to_string(),
        ];
        assert_eq!(
            dedupe_identifiers(ids),
            vec!["Name", "Name_2", "name_3", "Name_2_2"]
        );
    }

    #[test]
    fn indexed_table_names_keep_first_table_plain() {
        assert_eq!(table_name_for("Клиенты", 0, TableNaming::Indexed), "Klienty");
        assert_eq!(table_name_for("Клиенты", 1, TableNaming::Indexed), "Klienty_2");
        assert_eq!(table_name_for("Клиенты", 1, TableNaming::Shared), "Klienty");
    }
}
