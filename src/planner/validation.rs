use super::engine::{Ratings, MAX_RATING, MIN_RATING};

/// Validate user-supplied ratings before planning.
/// Returns all validation errors at once (not just the first), sorted by bar.
pub fn validate_ratings(ratings: &Ratings) -> Result<(), Vec<String>> {
    let mut bars: Vec<&String> = ratings.keys().collect();
    bars.sort();

    let mut errors = Vec::new();
    for bar in bars {
        if bar.trim().is_empty() {
            errors.push("ratings: bar name must not be blank".to_string());
            continue;
        }
        let rating = ratings[bar];
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            errors.push(format!(
                "ratings.{}: {} is out of range (must be {}-{})",
                bar, rating, MIN_RATING, MAX_RATING
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Parse a `--rate` argument of the form `"Bar Name=8"`.
/// The bar name may itself contain `=`; the last one separates the rating.
pub fn parse_rating_arg(arg: &str) -> Result<(String, u8), String> {
    let (bar, rating) = arg
        .rsplit_once('=')
        .ok_or_else(|| format!("expected BAR=RATING, got '{}'", arg))?;

    let bar = bar.trim();
    if bar.is_empty() {
        return Err(format!("missing bar name in '{}'", arg));
    }

    let rating: u8 = rating
        .trim()
        .parse()
        .map_err(|_| format!("rating in '{}' must be a whole number {}-{}", arg, MIN_RATING, MAX_RATING))?;
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(format!(
            "rating in '{}' must be between {} and {}",
            arg, MIN_RATING, MAX_RATING
        ));
    }

    Ok((bar.to_string(), rating))
}
