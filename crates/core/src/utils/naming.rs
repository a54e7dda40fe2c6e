//! Case conversions between option names, flags, plugin ids and env vars

fn words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for ch in name.chars() {
        if ch == '-' || ch == '_' || ch == ' ' || ch == '.' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.extend(ch.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// `other-module` -> `otherModule`
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, word) in words(name).iter().enumerate() {
        if i == 0 {
            out.push_str(word);
            continue;
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// `configPath` -> `config-path`
pub fn kebab_case(name: &str) -> String {
    words(name).join("-")
}

/// `configPath` -> `CONFIG_PATH`
pub fn screaming_snake_case(name: &str) -> String {
    words(name).join("_").to_uppercase()
}

/// Name of the environment variable feeding `option` for `tool`
pub fn env_var_name(tool: &str, option: &str) -> String {
    format!("{}_{}", screaming_snake_case(tool), screaming_snake_case(option))
}
