use axum::response::Html;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Social Listening Tool</title>
    <style>
        body { font-family: system-ui, sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; }
        form { display: flex; gap: 0.5rem; margin-bottom: 1rem; }
        input { flex: 1; padding: 0.5rem; font-size: 1rem; }
        button { padding: 0.5rem 1rem; font-size: 1rem; }
        pre { background: #f5f5f5; padding: 1rem; overflow-x: auto; white-space: pre-wrap; }
    </style>
</head>
<body>
    <h1>Social Listening Tool</h1>
    <form id="search-form">
        <input id="brand" type="text" placeholder="Enter a brand name" autocomplete="off" required>
        <button type="submit">Search</button>
    </form>
    <pre id="results"></pre>
    <script>
        const form = document.getElementById('search-form');
        const results = document.getElementById('results');

        form.addEventListener('submit', async (event) => {
            event.preventDefault();
            const brand = document.getElementById('brand').value.trim();
            if (!brand) {
                return;
            }
            results.textContent = 'Loading...';
            try {
                const response = await fetch(`/api/search/${encodeURIComponent(brand)}`);
                const data = await response.json();
                if (response.ok) {
                    results.textContent = JSON.stringify(data, null, 2);
                } else {
                    results.textContent = `Error: ${data.detail}`;
                }
            } catch (error) {
                results.textContent = `Error: ${error.message}`;
            }
        });
    </script>
</body>
</html>
"#;

pub(crate) async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
