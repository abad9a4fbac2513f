/// HTML 본문에 넣기 전에 특수 문자를 이스케이프합니다.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// URL 입력 폼
pub fn render_index_page() -> String {
    r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>Fetch Comments</title>
  </head>
  <body>
    <form method="post" action="/fetch_comments">
      <label for="url">TwitCasting URL:</label>
      <input type="text" id="url" name="url" required>
      <button type="submit">Fetch Comments</button>
    </form>
  </body>
</html>
"#
    .to_string()
}

/// 수집 결과 JSON과 다운로드 버튼을 보여주는 페이지
pub fn render_comments_page(pretty_json: &str, file_name: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>Fetched Comments</title>
  </head>
  <body>
    <h1>Fetched Comments</h1>
    <pre>{}</pre>
    <form method="post" action="/save_comments">
      <input type="hidden" name="file_name" value="{}">
      <button type="submit">Save to File</button>
    </form>
  </body>
</html>
"#,
        escape(pretty_json),
        escape(file_name)
    )
}
