//! Response parsers.
//!
//! Each parser takes raw model text and returns the typed section or `None`. They never
//! panic and never return errors, so a parse failure can be handled exactly like a call
//! failure. Models wrap JSON in prose or code fences, use camelCase keys, nest the
//! payload under a single envelope key, and send numbers where strings are expected;
//! all of that is tolerated.

use crate::site::{
    slugify, AboutSection, Branding, ContactSection, ContentItem, CustomPageContent,
    CustomPageItem, CustomPageSection, FeaturesSection, FoundationData, HeroSection,
    SeoDefaults, ServiceItem, ServicesSection, TeamMember, TeamSection, Testimonial,
    TestimonialsSection, ValuesSection,
};
use serde_json::{Map, Value};

type Object = Map<String, Value>;

/// Pull the first JSON object out of raw model output.
pub fn extract_json_object(raw: &str) -> Option<Object> {
    let trimmed = raw.trim();
    if let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(trimmed) {
        return Some(obj);
    }
    let unfenced = strip_code_fence(trimmed).unwrap_or(trimmed);
    if let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(unfenced.trim()) {
        return Some(obj);
    }
    let start = unfenced.find('{')?;
    let end = unfenced.rfind('}')?;
    if end <= start {
        return None;
    }
    match serde_json::from_str::<Value>(&unfenced[start..=end]) {
        Ok(Value::Object(obj)) => Some(obj),
        _ => None,
    }
}

fn strip_code_fence(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_open = &text[open + 3..];
    // Skip the language tag on the fence line.
    let body_start = after_open.find('\n').map(|i| i + 1).unwrap_or(0);
    let body = &after_open[body_start..];
    let close = body.find("```").unwrap_or(body.len());
    Some(&body[..close])
}

/// Descend into `{"about": {...}}`-style envelopes.
fn unwrap_envelope(mut obj: Object, keys: &[&str]) -> Object {
    loop {
        if obj.len() != 1 {
            return obj;
        }
        let key = match obj.keys().next() {
            Some(key) if keys.contains(&key.as_str()) => key.clone(),
            _ => return obj,
        };
        match obj.remove(&key) {
            Some(Value::Object(inner)) => obj = inner,
            Some(other) => {
                obj.insert(key, other);
                return obj;
            }
            None => return obj,
        }
    }
}

fn root(raw: &str, envelope: &[&str]) -> Option<Object> {
    extract_json_object(raw).map(|obj| unwrap_envelope(obj, envelope))
}

fn field<'a>(obj: &'a Object, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
}

fn as_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(as_text)
            .collect::<Vec<_>>()
            .join("; "),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn text(obj: &Object, keys: &[&str]) -> Option<String> {
    field(obj, keys).and_then(as_text)
}

/// Exact string value, untrimmed and possibly empty. Used where content must
/// survive verbatim.
fn raw_text(obj: &Object, keys: &[&str]) -> Option<String> {
    match field(obj, keys) {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

fn text_list(obj: &Object, keys: &[&str]) -> Vec<String> {
    match field(obj, keys) {
        Some(Value::Array(items)) => items.iter().filter_map(as_text).collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn object<'a>(obj: &'a Object, keys: &[&str]) -> Option<&'a Object> {
    field(obj, keys).and_then(Value::as_object)
}

fn object_list<'a>(obj: &'a Object, keys: &[&str]) -> Vec<&'a Object> {
    match field(obj, keys) {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_object).collect(),
        _ => Vec::new(),
    }
}

/// `#abc`, `abc`, `#AABBCC` → `#aabbcc`. Anything else is rejected.
pub fn normalize_hex_color(value: &str) -> Option<String> {
    let hex = value.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let expanded = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => hex.to_string(),
        _ => return None,
    };
    Some(format!("#{}", expanded.to_ascii_lowercase()))
}

fn color(obj: &Object, keys: &[&str]) -> Option<String> {
    text(obj, keys).and_then(|c| normalize_hex_color(&c))
}

/// Foundation requires a site name, a valid primary color and a hero headline.
pub fn parse_foundation_response(raw: &str) -> Option<FoundationData> {
    let obj = root(raw, &["foundation", "site", "website", "data"])?;
    let site_name = text(&obj, &["site_name", "siteName", "business_name", "businessName", "name"])?;

    let branding_obj = object(&obj, &["branding", "theme", "brand", "colors"]);
    let lookup = |keys: &[&str]| {
        branding_obj
            .and_then(|b| color(b, keys))
            .or_else(|| color(&obj, keys))
    };
    let primary_color = lookup(&["primary_color", "primaryColor", "primary"])?;
    let secondary_color = lookup(&["secondary_color", "secondaryColor", "secondary"])
        .unwrap_or_else(|| primary_color.clone());
    let accent_color = lookup(&["accent_color", "accentColor", "accent"]);
    let typography = branding_obj.and_then(|b| object(b, &["typography", "fonts"]));
    let font = |keys: &[&str], nested: &[&str]| {
        branding_obj
            .and_then(|b| text(b, keys))
            .or_else(|| typography.and_then(|t| text(t, nested)))
    };
    let branding = Branding {
        primary_color,
        secondary_color,
        accent_color,
        heading_font: font(&["heading_font", "headingFont"], &["heading", "headings"]),
        body_font: font(&["body_font", "bodyFont"], &["body", "text"]),
    };

    let hero_obj = object(&obj, &["hero", "hero_section", "heroSection"])?;
    let hero = HeroSection {
        headline: text(hero_obj, &["headline", "title", "heading"])?,
        subheadline: text(hero_obj, &["subheadline", "subHeadline", "subtitle", "subheading"])
            .unwrap_or_default(),
        cta_text: text(hero_obj, &["cta_text", "ctaText", "cta", "button_text"])
            .unwrap_or_else(|| "Get Started".to_string()),
        cta_link: text(hero_obj, &["cta_link", "ctaLink", "button_link"]),
        background_image: text(hero_obj, &["background_image", "backgroundImage"]),
    };

    let tagline = text(&obj, &["tagline", "slogan"]).unwrap_or_default();
    let description = text(&obj, &["description", "summary"]).unwrap_or_else(|| tagline.clone());
    let seo = match object(&obj, &["seo", "meta"]) {
        Some(seo) => SeoDefaults {
            title: text(seo, &["title", "meta_title", "metaTitle"])
                .unwrap_or_else(|| site_name.clone()),
            description: text(seo, &["description", "meta_description", "metaDescription"])
                .unwrap_or_else(|| description.clone()),
            keywords: text_list(seo, &["keywords"]),
        },
        None => SeoDefaults {
            title: site_name.clone(),
            description: description.clone(),
            keywords: Vec::new(),
        },
    };

    Some(FoundationData {
        site_name,
        tagline,
        description,
        hero,
        branding,
        seo,
    })
}

pub fn parse_about_response(raw: &str) -> Option<AboutSection> {
    let obj = root(raw, &["about", "about_section", "aboutSection", "section", "data"])?;
    Some(AboutSection {
        title: text(&obj, &["title", "heading"]).unwrap_or_else(|| "About Us".to_string()),
        content: text(&obj, &["content", "description", "body", "text"])?,
        mission: text(&obj, &["mission", "mission_statement", "missionStatement"]),
        story: text(&obj, &["story", "history"]),
        highlights: text_list(&obj, &["highlights", "key_points", "keyPoints"]),
    })
}

fn content_items(obj: &Object, keys: &[&str]) -> Vec<ContentItem> {
    object_list(obj, keys)
        .into_iter()
        .filter_map(|item| {
            Some(ContentItem {
                title: text(item, &["title", "name", "value", "feature"])?,
                description: text(item, &["description", "text", "details"]).unwrap_or_default(),
                icon: text(item, &["icon"]),
            })
        })
        .collect()
}

pub fn parse_values_response(raw: &str) -> Option<ValuesSection> {
    let obj = root(raw, &["values_section", "valuesSection", "section", "data"])?;
    let items = content_items(&obj, &["items", "values", "core_values", "coreValues"]);
    if items.is_empty() {
        return None;
    }
    Some(ValuesSection {
        title: text(&obj, &["title", "heading"]).unwrap_or_else(|| "Our Values".to_string()),
        subtitle: text(&obj, &["subtitle", "subheading"]),
        items,
    })
}

pub fn parse_features_response(raw: &str) -> Option<FeaturesSection> {
    let obj = root(raw, &["features_section", "featuresSection", "section", "data"])?;
    let items = content_items(&obj, &["items", "features"]);
    if items.is_empty() {
        return None;
    }
    Some(FeaturesSection {
        title: text(&obj, &["title", "heading"]).unwrap_or_else(|| "Why Choose Us".to_string()),
        subtitle: text(&obj, &["subtitle", "subheading"]),
        items,
    })
}

pub fn parse_services_response(raw: &str) -> Option<ServicesSection> {
    let obj = root(raw, &["services_section", "servicesSection", "section", "data"])?;
    let items: Vec<ServiceItem> = object_list(&obj, &["items", "services"])
        .into_iter()
        .filter_map(|item| {
            Some(ServiceItem {
                name: text(item, &["name", "title", "service"])?,
                description: text(item, &["description", "details"]).unwrap_or_default(),
                price: text(item, &["price", "cost", "pricing"]),
                duration: text(item, &["duration", "time"]),
            })
        })
        .collect();
    if items.is_empty() {
        return None;
    }
    Some(ServicesSection {
        title: text(&obj, &["title", "heading"]).unwrap_or_else(|| "Our Services".to_string()),
        subtitle: text(&obj, &["subtitle", "subheading"]),
        items,
    })
}

pub fn parse_team_response(raw: &str) -> Option<TeamSection> {
    let obj = root(raw, &["team_section", "teamSection", "section", "data"])?;
    let members: Vec<TeamMember> = object_list(&obj, &["members", "team", "items", "team_members"])
        .into_iter()
        .filter_map(|member| {
            Some(TeamMember {
                name: text(member, &["name", "full_name", "fullName"])?,
                role: text(member, &["role", "title", "position"])
                    .unwrap_or_else(|| "Team Member".to_string()),
                bio: text(member, &["bio", "description", "about"]),
                image: text(member, &["image", "photo", "avatar"]),
            })
        })
        .collect();
    if members.is_empty() {
        return None;
    }
    Some(TeamSection {
        title: text(&obj, &["title", "heading"]).unwrap_or_else(|| "Meet the Team".to_string()),
        subtitle: text(&obj, &["subtitle", "subheading"]),
        members,
    })
}

fn rating(item: &Object) -> Option<u8> {
    let value = field(item, &["rating", "stars", "score"])?;
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !number.is_finite() {
        return None;
    }
    Some(number.round().clamp(1.0, 5.0) as u8)
}

pub fn parse_testimonials_response(raw: &str) -> Option<TestimonialsSection> {
    let obj = root(raw, &["testimonials_section", "testimonialsSection", "section", "data"])?;
    let items: Vec<Testimonial> = object_list(&obj, &["items", "testimonials", "reviews"])
        .into_iter()
        .filter_map(|item| {
            Some(Testimonial {
                quote: text(item, &["quote", "text", "content", "review"])?,
                author: text(item, &["author", "name", "customer"])?,
                role: text(item, &["role", "title", "location"]),
                rating: rating(item),
            })
        })
        .collect();
    if items.is_empty() {
        return None;
    }
    Some(TestimonialsSection {
        title: text(&obj, &["title", "heading"])
            .unwrap_or_else(|| "What Our Customers Say".to_string()),
        items,
    })
}

/// Contact needs at least one recognised field; a title alone is enough.
pub fn parse_contact_response(raw: &str) -> Option<ContactSection> {
    let obj = root(raw, &["contact", "contact_section", "contactSection", "section", "data"])?;
    let details = object(&obj, &["details", "contact_info", "contactInfo"]).unwrap_or(&obj);
    let hours = field(details, &["hours", "business_hours", "businessHours", "opening_hours"])
        .and_then(|value| match value {
            Value::Object(days) => {
                let joined = days
                    .iter()
                    .filter_map(|(day, h)| as_text(h).map(|h| format!("{}: {}", day, h)))
                    .collect::<Vec<_>>()
                    .join("; ");
                Some(joined).filter(|j| !j.is_empty())
            }
            other => as_text(other),
        });
    let title = text(&obj, &["title", "heading"]);
    let email = text(details, &["email", "email_address", "emailAddress"]);
    let phone = text(details, &["phone", "phone_number", "phoneNumber", "telephone"]);
    let address = text(details, &["address", "location", "street_address"]);
    if title.is_none() && email.is_none() && phone.is_none() && address.is_none() && hours.is_none() {
        return None;
    }
    Some(ContactSection {
        title: title.unwrap_or_else(|| ContactSection::FALLBACK_TITLE.to_string()),
        email,
        phone,
        address,
        hours,
    })
}

/// Parse a custom page. `page_type` is carried through; the title falls back to
/// `default_title` and the slug to the slugified title.
pub fn parse_custom_page_response(
    raw: &str,
    page_type: &str,
    default_title: &str,
) -> Option<CustomPageSection> {
    let obj = root(raw, &["page", "custom_page", "customPage", "data"])?;
    let title = text(&obj, &["title", "page_title", "pageTitle"])
        .unwrap_or_else(|| default_title.to_string());
    let slug = text(&obj, &["slug"])
        .map(|s| slugify(&s))
        .unwrap_or_else(|| slugify(&title));
    let content_obj = object(&obj, &["content", "body"]).unwrap_or(&obj);

    let items: Vec<CustomPageItem> = object_list(content_obj, &["items", "questions", "faqs", "sections"])
        .into_iter()
        .filter_map(|item| {
            Some(CustomPageItem {
                title: raw_text(item, &["title", "question", "heading"])?,
                description: raw_text(item, &["description", "answer", "text", "content"])?,
            })
        })
        .collect();
    let rich_text = text(content_obj, &["rich_text", "richText", "markdown", "html"]);
    let description = text(content_obj, &["description", "intro", "summary"]).unwrap_or_default();
    let headline = text(content_obj, &["headline", "heading"]).unwrap_or_else(|| title.clone());

    if items.is_empty() && rich_text.is_none() && description.is_empty() {
        return None;
    }
    Some(CustomPageSection {
        page_type: page_type.to_string(),
        title,
        slug,
        content: CustomPageContent {
            headline,
            description,
            items,
            rich_text,
        },
    })
}
