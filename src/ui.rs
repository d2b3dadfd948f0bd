use crate::models::{Product, SummaryResponse};
use crate::pricing::group_thousands;

pub fn render_index(products: &[Product], summary: &SummaryResponse) -> String {
    let rows: String = products
        .iter()
        .enumerate()
        .map(|(index, product)| render_row(index, product))
        .collect();

    let summary_items: String = products
        .iter()
        .filter(|product| product.count > 0)
        .map(|product| {
            format!(
                "<li><span>{}</span><span>{}</span></li>\n",
                escape_html(&product.name),
                product.count
            )
        })
        .collect();

    INDEX_HTML
        .replace("{{ROWS}}", &rows)
        .replace("{{TOTAL}}", &summary.total_count.to_string())
        .replace("{{SUMMARY_ITEMS}}", &summary_items)
        .replace("{{PRICE}}", &group_thousands(summary.price))
        .replace("{{SUMMARY_TEXT}}", &escape_html(&summary.text))
}

fn render_row(index: usize, product: &Product) -> String {
    let name = escape_html(&product.name);
    let badge = if product.is_premium {
        r#" <span class="badge">פרימיום</span>"#
    } else {
        ""
    };
    format!(
        r#"<li class="row">
  <div>
    <span class="name">{name}{badge}</span>
    <span class="count">כמות: {count}</span>
  </div>
  <div class="row-actions">
    <form method="post" action="/products/{index}/increment">
      <button class="btn-inc" type="submit" aria-label="Increase count for {name}">+</button>
    </form>
    <form method="post" action="/products/{index}/decrement">
      <button class="btn-dec" type="submit" aria-label="Decrease count for {name}">-</button>
    </form>
  </div>
</li>
"#,
        count = product.count,
    )
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="he" dir="rtl">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>מונה סיגריות</title>
  <style>
    :root {
      --bg: #f3f4f6;
      --ink: #27272a;
      --muted: #6b7280;
      --card: #ffffff;
      --inc: #22c55e;
      --dec: #ef4444;
      --accent: #6366f1;
      --shadow: 0 12px 32px rgba(39, 39, 42, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: system-ui, "Segoe UI", sans-serif;
      padding: 16px;
    }

    .app {
      max-width: 36rem;
      margin: 0 auto;
      background: var(--card);
      border-radius: 12px;
      box-shadow: var(--shadow);
      padding: 24px;
    }

    header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      margin-bottom: 24px;
    }

    h1 {
      margin: 0;
      font-size: 1.5rem;
    }

    ul {
      list-style: none;
      margin: 0;
      padding: 0;
    }

    .row {
      display: flex;
      align-items: center;
      justify-content: space-between;
      margin-bottom: 16px;
    }

    .name {
      display: block;
      font-size: 1.1rem;
    }

    .count {
      font-size: 0.85rem;
      color: var(--muted);
    }

    .badge {
      font-size: 0.7rem;
      background: #fef3c7;
      border-radius: 999px;
      padding: 2px 8px;
    }

    .row-actions {
      display: flex;
      gap: 12px;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 6px;
      padding: 6px 12px;
      font-size: 1rem;
      color: white;
      cursor: pointer;
    }

    .btn-inc { background: var(--inc); }
    .btn-dec { background: var(--dec); }
    .btn-accent { background: var(--accent); }

    .summary {
      margin-top: 32px;
      border-top: 1px solid #e5e7eb;
      padding-top: 24px;
    }

    .summary li {
      display: flex;
      justify-content: space-between;
      margin-bottom: 8px;
    }

    .price {
      font-size: 1.25rem;
      font-weight: 700;
    }

    .summary-actions {
      display: flex;
      gap: 8px;
    }

    #summary-text {
      display: none;
    }

    dialog form {
      display: grid;
      gap: 12px;
    }

    .status {
      min-height: 1.2em;
      color: var(--muted);
    }

    .status[data-type="error"] {
      color: var(--dec);
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>מונה סיגריות</h1>
      <button class="btn-accent" id="open-add" type="button" aria-label="Add new product">+</button>
    </header>

    <ul id="products">
{{ROWS}}    </ul>

    <section class="summary">
      <div class="summary-actions">
        <button class="btn-accent" id="copy-btn" type="button">copy</button>
        <button class="btn-accent" id="save-btn" type="button">save</button>
      </div>
      <p><strong>היי,</strong></p>
      <p>יש לי בשבילך {{TOTAL}} פאקטים-</p>
      <ul>
{{SUMMARY_ITEMS}}      </ul>
      <p class="price">סך הכל זה יצא {{PRICE}} ש"ח</p>
      <pre id="summary-text">{{SUMMARY_TEXT}}</pre>
      <div class="status" id="status"></div>
    </section>
  </main>

  <dialog id="add-dialog">
    <h2>הוסף מוצר חדש</h2>
    <form method="post" action="/products/add">
      <label>שם המוצר:
        <input type="text" name="name" required />
      </label>
      <label>
        <input type="checkbox" name="is_premium" />
        האם זה מלבורו?
      </label>
      <div class="summary-actions">
        <button class="btn-dec" type="button" id="cancel-add">ביטול</button>
        <button class="btn-accent" type="submit">הוסף</button>
      </div>
    </form>
  </dialog>

  <script>
    const statusEl = document.getElementById('status');
    const dialog = document.getElementById('add-dialog');

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    document.getElementById('open-add').addEventListener('click', () => dialog.showModal());
    document.getElementById('cancel-add').addEventListener('click', () => dialog.close());

    document.getElementById('copy-btn').addEventListener('click', async () => {
      const text = document.getElementById('summary-text').textContent;
      try {
        await navigator.clipboard.writeText(text);
        alert('הטקסט הועתק ללוח');
      } catch (err) {
        console.error('Error copying text: ', err);
        alert('שגיאה בהעתקת הטקסט');
      }
    });

    document.getElementById('save-btn').addEventListener('click', async () => {
      try {
        const products = await fetch('/api/products').then((res) => res.json());
        const res = await fetch('/api/saveProducts', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify(products)
        });
        const body = await res.json();
        if (!body.success) {
          throw new Error(body.error);
        }
        setStatus(`נשמרו ${body.data.length} מוצרים`, 'ok');
      } catch (err) {
        console.error('Error saving products: ', err);
        setStatus('שגיאה בשמירה', 'error');
      }
    });
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{PriceConfig, build_summary};

    #[test]
    fn page_lists_products_and_price() {
        let products = vec![Product::new("Camel", 4, false), Product::new("Winston", 0, false)];
        let summary = build_summary(&products, &PriceConfig::default());
        let html = render_index(&products, &summary);
        assert!(html.contains("/products/0/increment"));
        assert!(html.contains("/products/1/decrement"));
        assert!(html.contains("סך הכל זה יצא 1,000 ש\"ח"));
        assert!(html.contains("<li><span>Camel</span><span>4</span></li>"));
        assert!(!html.contains("<li><span>Winston</span>"));
    }

    #[test]
    fn names_are_escaped() {
        let products = vec![Product::new("<b>L&M</b>", 1, true)];
        let summary = build_summary(&products, &PriceConfig::default());
        let html = render_index(&products, &summary);
        assert!(html.contains("&lt;b&gt;L&amp;M&lt;/b&gt;"));
        assert!(!html.contains("<b>L&M</b>"));
    }
}
