// File: ./src/model/display.rs
use crate::model::event::{Event, Group};
use unicode_width::UnicodeWidthStr;

pub const NO_MATCHES: &str = "未找到匹配的赛事信息";
pub const NO_MATCHES_HINT: &str = "重置筛选条件: 清空搜索并选择全部级别";

/// Column width reserved for the province in card lines (display cells).
const PROVINCE_COLUMN: usize = 8;

pub trait EventDisplay {
    fn badge(&self) -> String;
    fn card_line(&self) -> String;
}

impl EventDisplay for Event {
    fn badge(&self) -> String {
        format!("[{}]", self.category_label())
    }

    fn card_line(&self) -> String {
        let mut s = format!(
            "{} {} {}",
            self.badge(),
            pad_to_width(&self.province, PROVINCE_COLUMN),
            self.name
        );
        if !self.event_type.is_empty() {
            s.push_str(&format!(" · {}", self.event_type));
        }
        if !self.organizer.is_empty() {
            s.push_str(&format!(" · {}", self.organizer));
        }
        s
    }
}

/// Right-pads `s` with spaces until it occupies `width` terminal cells.
/// CJK glyphs count as two cells.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let w = s.width();
    if w >= width {
        return s.to_string();
    }
    format!("{}{}", s, " ".repeat(width - w))
}

pub fn group_heading(group: &Group<'_>) -> String {
    let date = if group.date.is_empty() {
        "(未定日期)"
    } else {
        group.date
    };
    format!("── {} ─── {} 场赛事", date, group.len())
}

pub fn render_groups(groups: &[Group<'_>]) -> String {
    if groups.is_empty() {
        return format!("{}\n{}\n", NO_MATCHES, NO_MATCHES_HINT);
    }

    let mut out = String::new();
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&group_heading(group));
        out.push('\n');
        for event in &group.events {
            out.push_str("  ");
            out.push_str(&event.card_line());
            out.push('\n');
        }
    }
    out
}

/// Province counts as aligned text with a proportional bar.
pub fn render_tally(counts: &[(String, usize)]) -> String {
    let max = counts.iter().map(|(_, c)| *c).max().unwrap_or(0);
    let mut out = String::new();
    for (province, count) in counts {
        let bar = if max == 0 { 0 } else { (count * 20).div_ceil(max) };
        out.push_str(&format!(
            "{} {:>3} {}\n",
            pad_to_width(province, PROVINCE_COLUMN),
            count,
            "█".repeat(bar)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    #[test]
    fn test_pad_counts_wide_glyphs() {
        assert_eq!(pad_to_width("北京", 6), "北京  ");
        assert_eq!(pad_to_width("abc", 5), "abc  ");
        assert_eq!(pad_to_width("黑龙江省份", 4), "黑龙江省份");
    }

    #[test]
    fn test_card_line_skips_empty_fields() {
        let mut e = Event::new(1, "2026北京马拉松", "北京", "2026-10-25", Category::A);
        assert_eq!(e.card_line(), "[A类赛事] 北京     2026北京马拉松");

        e.event_type = "马拉松".to_string();
        assert!(e.card_line().ends_with("2026北京马拉松 · 马拉松"));
    }

    #[test]
    fn test_tally_bars_scale_to_max() {
        let counts = vec![("北京".to_string(), 4), ("上海".to_string(), 1)];
        let text = render_tally(&counts);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], format!("北京       4 {}", "█".repeat(20)));
        assert_eq!(lines[1], format!("上海       1 {}", "█".repeat(5)));
        assert_eq!(render_tally(&[]), "");
    }

    #[test]
    fn test_empty_date_heading() {
        let e = Event::new(1, "x", "y", "", Category::C);
        let g = Group {
            date: "",
            events: vec![&e],
        };
        assert_eq!(group_heading(&g), "── (未定日期) ─── 1 场赛事");
    }
}
