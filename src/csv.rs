//
// PracticeViewer 1.0
// License: MIT
//

//! スプレッドシートが出力するCSVの分解
//!
//! クォートされたフィールド内のカンマ・改行と、`""` によるエスケープに対応する。
//! 各フィールドは前後の空白を除去し、全フィールドが空の行は捨てる。

/// CSVテキストを行ごとのフィールド列に分解する
pub fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => end_field(&mut row, &mut field),
            '\n' => {
                end_field(&mut row, &mut field);
                end_row(&mut rows, &mut row);
            }
            _ => field.push(c),
        }
    }

    // 末尾の空フィールドは `,` で終わったときだけ数える (`a,""` は1列)
    if !field.is_empty() || text.ends_with(',') {
        end_field(&mut row, &mut field);
    }
    end_row(&mut rows, &mut row);
    rows
}

fn end_field(row: &mut Vec<String>, field: &mut String) {
    row.push(field.trim().to_string());
    field.clear();
}

fn end_row(rows: &mut Vec<Vec<String>>, row: &mut Vec<String>) {
    let row = std::mem::take(row);
    if row.iter().any(|f| !f.is_empty()) {
        rows.push(row);
    }
}

#[cfg(test)]
mod tests {
    use super::parse_csv;

    #[test]
    fn test_quoted_comma_and_escaped_quote() {
        let rows = parse_csv(r#""a,b""c""#);
        assert_eq!(rows, vec![vec![r#"a,b"c"#.to_string()]]);
    }

    #[test]
    fn test_plain_rows() {
        let rows = parse_csv("日付,曜日,時間\n5/1,木,16:30\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["5/1", "木", "16:30"]);
    }

    #[test]
    fn test_newline_inside_quotes() {
        let rows = parse_csv("5/2,\"1000m×5\n200m×10\",x");
        assert_eq!(rows, vec![vec!["5/2", "1000m×5\n200m×10", "x"]]);
    }

    #[test]
    fn test_line_endings_normalized() {
        let crlf = parse_csv("a,b\r\nc,d\re,f");
        assert_eq!(crlf, vec![vec!["a", "b"], vec!["c", "d"], vec!["e", "f"]]);
    }

    #[test]
    fn test_blank_rows_dropped() {
        let rows = parse_csv("a,b\n , \n,,\n\nc,d\n");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_fields_trimmed_and_trailing_comma_kept() {
        let rows = parse_csv("  x  ,\"  y \",");
        assert_eq!(rows, vec![vec!["x", "y", ""]]);
    }

    #[test]
    fn test_empty_quoted_last_field_dropped() {
        assert_eq!(parse_csv("a,\"\""), vec![vec!["a"]]);
        assert_eq!(parse_csv("a,"), vec![vec!["a", ""]]);
        assert_eq!(parse_csv("a,\"\"\nb"), vec![vec!["a", ""], vec!["b"]]);
    }

    #[test]
    fn test_unterminated_quote_keeps_rest() {
        let rows = parse_csv("a,\"b,c\nd");
        assert_eq!(rows, vec![vec!["a", "b,c\nd"]]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_csv("").is_empty());
        assert!(parse_csv("\n\r\n").is_empty());
    }
}
