//! Install Instructions
//!
//! Text for `GET /`. Both forms embed a placeholder token, never the secret.

use axum::http::{header, HeaderMap};

const PLACEHOLDER_TOKEN: &str = "your-secret-token";

/// Returns true when the caller looks like curl.
pub fn wants_plain_text(headers: &HeaderMap) -> bool {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|ua| ua.to_lowercase().contains("curl"))
        .unwrap_or(false)
}

/// Example endpoint URL built from the request's own origin.
pub fn example_endpoint(headers: &HeaderMap) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .filter(|p| *p == "http" || *p == "https")
        .unwrap_or("http");
    format!("{}://{}/{}", scheme, host, PLACEHOLDER_TOKEN)
}

pub fn render_text(endpoint: &str) -> String {
    format!(
        "sharenv - Quick Install:\n\
         export SHARENV_ENDPOINT=\"{endpoint}\"\n\
         eval $(curl -s $SHARENV_ENDPOINT)\n"
    )
}

pub fn render_html(endpoint: &str) -> String {
    let endpoint = html_escape(endpoint);
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>sharenv - Installation Instructions</title>
    <style>
        body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 800px; margin: 50px auto; padding: 20px; line-height: 1.6; color: #333; }}
        h1 {{ color: #2c3e50; border-bottom: 3px solid #3498db; padding-bottom: 10px; }}
        code {{ background-color: #f4f4f4; padding: 2px 6px; border-radius: 3px; }}
        pre {{ background-color: #2c3e50; color: #ecf0f1; padding: 15px; border-radius: 5px; overflow-x: auto; }}
        .step {{ background-color: #f8f9fa; padding: 15px; margin: 15px 0; border-left: 4px solid #28a745; }}
        .warning {{ background-color: #fff3cd; border-left: 4px solid #ffc107; padding: 15px; margin: 20px 0; }}
    </style>
</head>
<body>
    <h1>sharenv - Installation Instructions</h1>
    <p><strong>sharenv</strong> shares environment variables and aliases across machines.
    Add the following to your shell profile (<code>~/.bashrc</code>, <code>~/.zshrc</code>, ...).</p>

    <div class="step">
        <h2>Step 1: Set your endpoint</h2>
        <p>Replace <code>{PLACEHOLDER_TOKEN}</code> with your actual token:</p>
        <pre>export SHARENV_ENDPOINT="{endpoint}"</pre>
    </div>

    <div class="step">
        <h2>Step 2: Load environment variables</h2>
        <pre>eval $(curl -s $SHARENV_ENDPOINT)</pre>
    </div>

    <div class="step">
        <h2>Step 3: Apply changes</h2>
        <pre>source ~/.bashrc  # or ~/.zshrc</pre>
        <p>Or open a new terminal window.</p>
    </div>

    <div class="warning">
        <strong>Security note:</strong> the token in the URL is the only authentication for your variables. Keep it private.
    </div>

    <h2>How it works</h2>
    <ul>
        <li>Variables and aliases are served as shell commands</li>
        <li>Edits to the served files are picked up automatically</li>
        <li>Variables with several values return one of them at random on each request</li>
    </ul>
</body>
</html>
"#
    )
}

fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_curl_detection_is_case_insensitive() {
        assert!(wants_plain_text(&headers(&[("user-agent", "curl/8.4.0")])));
        assert!(wants_plain_text(&headers(&[("user-agent", "CURL")])));
        assert!(!wants_plain_text(&headers(&[("user-agent", "Mozilla/5.0")])));
        assert!(!wants_plain_text(&HeaderMap::new()));
    }

    #[test]
    fn test_example_endpoint_uses_request_origin() {
        assert_eq!(
            example_endpoint(&headers(&[("host", "env.example.com:5000")])),
            "http://env.example.com:5000/your-secret-token"
        );
        assert_eq!(
            example_endpoint(&headers(&[
                ("host", "env.example.com"),
                ("x-forwarded-proto", "https"),
            ])),
            "https://env.example.com/your-secret-token"
        );
    }

    #[test]
    fn test_render_text() {
        let text = render_text("http://h/your-secret-token");
        assert!(text.contains("export SHARENV_ENDPOINT=\"http://h/your-secret-token\""));
        assert!(text.contains("eval $(curl -s $SHARENV_ENDPOINT)"));
    }

    #[test]
    fn test_render_html_escapes_endpoint() {
        let html = render_html("http://<h>/your-secret-token");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("http://&lt;h&gt;/your-secret-token"));
        assert!(!html.contains("<h>"));
    }
}
