use crate::schema::news::Headline;
use crate::schema::quote::Quote;
use std::collections::HashMap;

////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Digest text assembly. Everything here is pure: same inputs, same bytes.
//
////////////////////////////////////////////////////////////////////////////////////////////////////

// Fixed blocks carried over from the production message, verbatim.
static HEADLINES_HEADER: &str = "\n📌 今日头条：";
static NO_HEADLINES: &str = "- 无法获取新闻摘要";
static TOPICS_HEADER: &str = "\n📝 学习主题与待办：";
static TOPICS_THEME: &str = "- 学习主题：美联储与宏观传导（继续）";
static TOPICS_TODO: &str = "- 待办：1) 阅读 FOMC 文稿 2) 整理笔记 3) 复盘上周数据";
static RISK_NOTE: &str = "\n⚠️ 风险提示：注意美债收益率与重要数据发布。";

/// Render the whole digest in message order: header, one line per requested
/// symbol (input order), headlines, then the fixed topic and risk blocks.
pub fn render(
    date: &str,
    symbols: &[String],
    quotes: &HashMap<String, Quote>,
    headlines: &[Headline],
) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("📰 {date} 早间宏观摘要\n"));

    for symbol in symbols {
        lines.push(quote_line(symbol, quotes.get(symbol)));
    }

    lines.push(HEADLINES_HEADER.to_string());
    if headlines.is_empty() {
        lines.push(NO_HEADLINES.to_string());
    } else {
        for headline in headlines {
            lines.push(format!("- {}", headline.title));
        }
    }

    lines.push(TOPICS_HEADER.to_string());
    lines.push(TOPICS_THEME.to_string());
    lines.push(TOPICS_TODO.to_string());

    lines.push(RISK_NOTE.to_string());

    lines.join("\n")
}

/// `"<symbol>: <price> (<signed-change> / <signed-pct>%)"`. The sign comes from
/// the change alone: `+` only when strictly positive, negatives carry their own
/// minus. Without a usable change/pct pair, the raw price stands alone; without
/// a price, the symbol is N/A.
fn quote_line(symbol: &str, quote: Option<&Quote>) -> String {
    let Some(quote) = quote else {
        return format!("{symbol}: N/A");
    };
    let Some(price) = quote.price else {
        return format!("{symbol}: N/A");
    };

    match (quote.change, quote.change_pct) {
        (Some(change), Some(pct)) => {
            let sign = if change > 0.0 { "+" } else { "" };
            format!(
                "{symbol}: {price} ({sign}{} / {sign}{}%)",
                round2(change),
                round2(pct)
            )
        }
        _ => format!("{symbol}: {price}"),
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
