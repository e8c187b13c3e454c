//! Visitor analytics page.

use maud::{Markup, html};

use packblog_core::domain::{CountryCount, VISITOR_LIST_LIMIT, Visitor, VisitorStats};

use super::{dashboard_layout, format_date_time};

pub struct VisitorsPage<'a> {
    pub selected_country: Option<&'a str>,
    pub countries: &'a [String],
    pub stats: VisitorStats,
    /// Per-country counts over the fetched rows; `None` while filtering.
    pub breakdown: Option<&'a [CountryCount]>,
    pub visitors: &'a [Visitor],
}

pub fn visitors_page(page: &VisitorsPage<'_>) -> Markup {
    let content = html! {
        div.page-header {
            h1 { "Visitors" }
        }
        div.stats {
            (stat_card("Total visitors", page.stats.total))
            (stat_card("With email", page.stats.with_email))
            (stat_card("Cookies accepted", page.stats.cookies_accepted))
        }
        form.filters method="get" action="/dashboard/visitors" {
            select name="country" data-autosubmit {
                option value="all" selected[page.selected_country.is_none()] { "All countries" }
                @for country in page.countries {
                    option value=(country) selected[page.selected_country == Some(country.as_str())] {
                        (country)
                    }
                }
            }
            button type="submit" { "Filter" }
        }
        @if let Some(breakdown) = page.breakdown {
            section.breakdown {
                h2 { "Visitors by country" }
                p.muted { "Based on the latest " (VISITOR_LIST_LIMIT) " visits." }
                ul.country-counts {
                    @for entry in breakdown {
                        li {
                            span.country { (entry.country) }
                            span.count { (entry.count) }
                        }
                    }
                }
            }
        }
        @if page.visitors.is_empty() {
            p.empty { "No visitors found." }
        } @else {
            table.data-table {
                thead {
                    tr {
                        th { "IP" }
                        th { "Country" }
                        th { "City" }
                        th { "Email" }
                        th { "Cookies" }
                        th { "Visited" }
                    }
                }
                tbody {
                    @for visitor in page.visitors {
                        tr {
                            td { code { (visitor.ip) } }
                            td { (visitor.country.as_deref().unwrap_or("Unknown")) }
                            td { (visitor.city.as_deref().unwrap_or("-")) }
                            td { (visitor.email.as_deref().unwrap_or("-")) }
                            td {
                                @if visitor.cookies_accepted {
                                    span.badge.published { "Accepted" }
                                } @else {
                                    span.badge.draft { "Declined" }
                                }
                            }
                            td { (format_date_time(&visitor.visited_at)) }
                        }
                    }
                }
            }
        }
    };
    dashboard_layout("Visitors", "visitors", content)
}

fn stat_card(label: &str, value: u64) -> Markup {
    html! {
        div.stat-card {
            span.stat-value { (value) }
            span.stat-label { (label) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use packblog_core::domain::tally_by_country;
    use uuid::Uuid;

    fn visitor(country: Option<&str>) -> Visitor {
        Visitor {
            id: Uuid::new_v4(),
            ip: "203.0.113.9".to_string(),
            country: country.map(String::from),
            city: None,
            email: None,
            cookies_accepted: true,
            visited_at: Utc::now(),
        }
    }

    #[test]
    fn test_breakdown_shown_without_filter() {
        let visitors = vec![visitor(Some("Peru")), visitor(None), visitor(Some("Peru"))];
        let breakdown = tally_by_country(&visitors);
        let countries = vec!["Peru".to_string()];
        let html = visitors_page(&VisitorsPage {
            selected_country: None,
            countries: &countries,
            stats: VisitorStats {
                total: 3,
                with_email: 0,
                cookies_accepted: 3,
            },
            breakdown: Some(&breakdown),
            visitors: &visitors,
        })
        .into_string();

        assert!(html.contains("Visitors by country"));
        assert!(html.contains("Based on the latest 1000 visits."));
        assert!(html.contains(r#"<span class="country">Unknown</span>"#));
    }

    #[test]
    fn test_filtered_page_selects_country() {
        let countries = vec!["Chile".to_string(), "Peru".to_string()];
        let html = visitors_page(&VisitorsPage {
            selected_country: Some("Peru"),
            countries: &countries,
            stats: VisitorStats::default(),
            breakdown: None,
            visitors: &[],
        })
        .into_string();

        assert!(!html.contains("Visitors by country"));
        assert!(html.contains(r#"<option value="Peru" selected>"#));
        assert!(html.contains("No visitors found."));
    }
}
