use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use cre_pages::config::SiteConfig;
use cre_pages::{GenError, Site};
use serde_json::json;
use tempfile::TempDir;
use walkdir::WalkDir;

const LOANS: [&str; 6] = [
    "bridge-loans",
    "cmbs-loans",
    "construction-loans",
    "sba-504",
    "life-company-loans",
    "agency-loans",
];

const PROPERTIES: [&str; 6] = [
    "multifamily",
    "office",
    "retail",
    "industrial",
    "hospitality",
    "self-storage",
];

const CITIES: [(&str, &str); 15] = [
    ("Austin", "TX"),
    ("Dallas", "TX"),
    ("Houston", "TX"),
    ("Phoenix", "AZ"),
    ("Denver", "CO"),
    ("Atlanta", "GA"),
    ("Miami", "FL"),
    ("Tampa", "FL"),
    ("Charlotte", "NC"),
    ("Nashville", "TN"),
    ("Los Angeles", "CA"),
    ("San Diego", "CA"),
    ("Seattle", "WA"),
    ("Chicago", "IL"),
    ("Boise", "ID"),
];

fn title_case(slug: &str) -> String {
    slug.split('-')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_json(dir: &Path, name: &str, value: serde_json::Value) {
    fs::write(dir.join(name), serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

/// A site with 6 loan types, 6 property types and 15 cities
fn fixture_site() -> (TempDir, Site) {
    let tmp = TempDir::new().unwrap();
    let data_dir = tmp.path().join("data");
    fs::create_dir_all(&data_dir).unwrap();

    let loans: Vec<_> = LOANS
        .iter()
        .map(|slug| {
            json!({
                "slug": slug,
                "name": title_case(slug),
                "seo": {"title": format!("{} | CLS CRE", title_case(slug)), "meta_description": "Hub"},
                "description": format!("All about {}", slug)
            })
        })
        .collect();
    write_json(&data_dir, "loan_types.json", json!(loans));

    let props: Vec<_> = PROPERTIES
        .iter()
        .map(|slug| {
            json!({
                "slug": slug,
                "name": title_case(slug),
                "seo": {"title": title_case(slug), "meta_description": "Hub"}
            })
        })
        .collect();
    write_json(&data_dir, "property_types.json", json!(props));

    let cities: Vec<_> = CITIES
        .iter()
        .map(|(city, state)| {
            json!({
                "city": city,
                "state": state,
                "metro": format!("{} Metro", city),
                "context": format!("{} is a deep commercial real estate market with steady absorption, strong lender appetite and a pipeline of value-add opportunities across asset classes.", city)
            })
        })
        .collect();
    write_json(&data_dir, "cities.json", json!(cities));

    // Texas and Florida deals only, so most city pages use the fallback
    write_json(
        &data_dir,
        "transactions.json",
        json!([
            {"amount": "$12.5M", "amount_num": 12500000, "city": "Austin, TX", "state": "TX",
             "loan_type_slug": "bridge-loans", "property_slug": "multifamily", "lender": "Regional Bank"},
            {"amount": "$4.1M", "amount_num": 4100000, "city": "Houston, TX", "state": "TX",
             "loan_type_slug": "bridge-loans", "property_slug": "office"},
            {"amount_num": 30000000, "city": "Miami, FL", "state": "FL",
             "loan_type_slug": "cmbs-loans", "property_slug": "retail"},
            {"city": "Tampa, FL", "state": "FL",
             "loan_type_slug": "bridge-loans", "property_slug": "industrial"},
            {"amount_num": 8000000, "city": "Dallas, TX", "state": "TX",
             "loan_type_slug": "bridge-loans", "property_slug": "multifamily"},
            {"amount_num": 950000, "city": "Tampa, FL", "state": "FL",
             "loan_type_slug": "bridge-loans", "property_slug": "office"}
        ]),
    );

    write_json(
        &data_dir,
        "faqs.json",
        json!({
            "loan_types": {
                "bridge-loans": [{"q": "How fast can a bridge loan close?", "a": "Often in 2-3 weeks."}]
            },
            "property_types": {},
            "city_templates": {
                "financing": [
                    {"q": "What are {loan_type} rates in {city}?",
                     "a": "Across the {metro}, rates range from {rate_low} to {rate_high}. {context_snippet}"}
                ],
                "property": [
                    {"q": "Who lends on {property_type} in {city}?",
                     "a": "Banks and debt funds active in {metro}."}
                ]
            }
        }),
    );

    let config = SiteConfig {
        url: "https://example.com".to_string(),
        lastmod: Some("2024-05-01".to_string()),
        ..SiteConfig::default()
    };
    let site = Site::with_config(tmp.path(), config);
    (tmp, site)
}

fn snapshot(dir: &Path) -> BTreeMap<String, Vec<u8>> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(dir).unwrap().to_string_lossy().to_string();
            (rel, fs::read(e.path()).unwrap())
        })
        .collect()
}

#[test]
fn test_generates_every_family() {
    let (_tmp, site) = fixture_site();
    let report = site.generate().unwrap();

    assert_eq!(report.loan_hubs, 6);
    assert_eq!(report.property_hubs, 6);
    assert_eq!(report.city_loans, 90);
    assert_eq!(report.city_properties, 90);
    assert_eq!(report.total_pages(), 192);
    assert_eq!(report.sitemap_urls, 192 + 4);

    let financing: Vec<String> = fs::read_dir(site.public_dir.join("financing"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(financing.len(), 6 + 90);

    let mut city_pages = HashSet::new();
    for loan in LOANS {
        for (city, state) in CITIES {
            let slug = slug::slugify(format!("{} {}", city, state));
            let name = format!("{}-{}.html", loan, slug);
            assert!(financing.contains(&name), "missing {}", name);
            assert!(city_pages.insert(name));
        }
    }
    assert_eq!(city_pages.len(), 90);
}

#[test]
fn test_sitemap_and_robots() {
    let (_tmp, site) = fixture_site();
    site.generate().unwrap();

    let sitemap = fs::read_to_string(site.public_dir.join("sitemap.xml")).unwrap();
    assert!(sitemap.starts_with("<?xml"));
    assert_eq!(sitemap.matches("<url>").count(), 196);
    assert!(sitemap.contains("<loc>https://example.com/</loc>"));
    assert!(sitemap.contains("<loc>https://example.com/market-data.html</loc>"));
    assert!(sitemap.contains("<loc>https://example.com/about.html</loc>"));
    assert!(sitemap.contains("<loc>https://example.com/contact.html</loc>"));
    assert!(sitemap.contains("<loc>https://example.com/financing/sba-504.html</loc>"));
    assert!(sitemap.contains("<loc>https://example.com/property/office-boise-id.html</loc>"));
    assert!(sitemap.contains("<lastmod>2024-05-01</lastmod>"));
    assert_eq!(sitemap.matches("<priority>0.9</priority>").count(), 12);
    assert_eq!(sitemap.matches("<priority>0.7</priority>").count(), 180);

    let robots = fs::read_to_string(site.public_dir.join("robots.txt")).unwrap();
    assert_eq!(
        robots,
        "User-agent: *\nAllow: /\n\nSitemap: https://example.com/sitemap.xml\n"
    );
}

#[test]
fn test_page_content() {
    let (_tmp, site) = fixture_site();
    site.generate().unwrap();

    let hub = fs::read_to_string(site.public_dir.join("financing/bridge-loans.html")).unwrap();
    assert!(hub.contains("<title>Bridge Loans | CLS CRE</title>"));
    assert!(hub.contains("How fast can a bridge loan close?"));
    assert!(hub.contains("href=\"../css/style.css\""));
    assert!(hub.contains("bridge-loans-austin-tx.html"));
    // Largest first
    let big = hub.find("$12.5M").unwrap();
    let small = hub.find("$4.1M").unwrap();
    assert!(big < small);

    let austin =
        fs::read_to_string(site.public_dir.join("financing/bridge-loans-austin-tx.html")).unwrap();
    assert!(austin.contains("<title>Bridge Loans in Austin, TX | CLS CRE</title>"));
    assert!(austin.contains("What are bridge loans rates in Austin?"));
    assert!(austin.contains("Across the Austin Metro, rates range from 5.34% to 8.25%."));
    assert!(!austin.contains("{city}"));
    assert!(austin.contains("https://example.com/financing/bridge-loans-austin-tx.html"));
    // Texas deals only
    assert!(austin.contains("$4.1M"));
    assert!(austin.contains("$8M"));
    assert!(!austin.contains("$950K"));

    let prop =
        fs::read_to_string(site.public_dir.join("property/multifamily-dallas-tx.html")).unwrap();
    assert!(prop.contains("Multifamily Financing in Dallas, TX | CLS CRE"));
    assert!(prop.contains("Who lends on multifamily in Dallas?"));
}

#[test]
fn test_state_fallback_limits_to_three() {
    let (_tmp, site) = fixture_site();
    site.generate().unwrap();

    // No Colorado deals: top three bridge deals nationwide
    let denver =
        fs::read_to_string(site.public_dir.join("financing/bridge-loans-denver-co.html")).unwrap();
    assert!(denver.contains("$12.5M"));
    assert!(denver.contains("$8M"));
    assert!(denver.contains("$4.1M"));
    assert!(!denver.contains("$950K"));
}

#[test]
fn test_rerun_is_byte_identical() {
    let (_tmp, site) = fixture_site();
    site.generate().unwrap();
    let first = snapshot(&site.public_dir);

    site.generate().unwrap();
    let second = snapshot(&site.public_dir);

    assert_eq!(first.len(), 192 + 2);
    assert_eq!(first, second);
}

#[test]
fn test_clean_after_generate() {
    let (_tmp, site) = fixture_site();
    site.generate().unwrap();
    site.clean().unwrap();
    assert!(snapshot(&site.public_dir).is_empty());
}

#[test]
fn test_missing_data_aborts() {
    let (_tmp, site) = fixture_site();
    fs::remove_file(site.data_dir.join("cities.json")).unwrap();

    let err = site.generate().unwrap_err();
    assert!(matches!(err, GenError::Load { .. }));
    assert!(!site.public_dir.join("sitemap.xml").exists());
}

#[test]
fn test_broken_template_override_aborts() {
    let (_tmp, site) = fixture_site();
    fs::create_dir_all(&site.template_dir).unwrap();
    fs::write(
        site.template_dir.join("city_property.html"),
        "{{ prop.name | no_such_filter }}",
    )
    .unwrap();

    let err = site.generate().unwrap_err();
    assert!(matches!(err, GenError::Render { .. }));
    assert!(!site.public_dir.join("sitemap.xml").exists());
}

#[test]
fn test_site_reads_config_file() {
    let (tmp, _) = fixture_site();
    fs::write(
        tmp.path().join("_config.yml"),
        "title: Acme Capital\npublic_dir: out\nlastmod: \"2024-05-01\"\n",
    )
    .unwrap();

    let site = Site::new(tmp.path()).unwrap();
    assert_eq!(site.public_dir, tmp.path().join("out"));

    site.generate().unwrap();
    let page = fs::read_to_string(site.public_dir.join("property/retail-miami-fl.html")).unwrap();
    assert!(page.contains("Retail Financing in Miami, FL | Acme Capital"));
}

fn meta_content<'a>(html: &'a str, name: &str) -> &'a str {
    let marker = format!("<meta name=\"{}\" content=\"", name);
    let start = html.find(&marker).unwrap() + marker.len();
    let len = html[start..].find('"').unwrap();
    &html[start..start + len]
}

#[test]
fn test_long_meta_description_is_clipped() {
    let (_tmp, site) = fixture_site();
    let long = "Bridge financing for value-add multifamily, office, retail and industrial \
                acquisitions nationwide with closings in as little as three weeks, \
                interest-only terms, flexible prepayment and non-recourse structures available.";
    assert!(long.chars().count() > 160);
    write_json(
        &site.data_dir,
        "loan_types.json",
        json!([{
            "slug": "bridge-loans",
            "name": "Bridge Loans",
            "seo": {"title": "Bridge Loans | CLS CRE", "meta_description": long}
        }]),
    );
    site.generate().unwrap();

    let hub = fs::read_to_string(site.public_dir.join("financing/bridge-loans.html")).unwrap();
    let description = meta_content(&hub, "description");
    assert!(description.chars().count() <= 160);
    assert!(description.ends_with("..."));
    assert!(long.starts_with(description.trim_end_matches("...")));
    assert!(hub.contains(&format!("<meta property=\"og:description\" content=\"{}\">", description)));

    // Short descriptions pass through untouched
    let prop = fs::read_to_string(site.public_dir.join("property/office.html")).unwrap();
    assert_eq!(meta_content(&prop, "description"), "Hub");
}

#[test]
fn test_canonical_url_matches_sitemap_for_non_ascii_slug() {
    let (_tmp, site) = fixture_site();
    write_json(
        &site.data_dir,
        "cities.json",
        json!([{
            "slug": "são-paulo-sp",
            "city": "São Paulo",
            "state": "SP",
            "metro": "Greater São Paulo",
            "context": "Latin America's largest office market."
        }]),
    );
    site.generate().unwrap();

    let encoded = "https://example.com/financing/bridge-loans-s%C3%A3o-paulo-sp.html";
    let page = fs::read_to_string(site.public_dir.join("financing/bridge-loans-são-paulo-sp.html"))
        .unwrap();
    assert!(page.contains(&format!("<link rel=\"canonical\" href=\"{}\">", encoded)));
    assert!(page.contains(&format!("<meta property=\"og:url\" content=\"{}\">", encoded)));
    assert!(!page.contains("href=\"https://example.com/financing/bridge-loans-são"));

    let sitemap = fs::read_to_string(site.public_dir.join("sitemap.xml")).unwrap();
    assert!(sitemap.contains(&format!("<loc>{}</loc>", encoded)));
}
