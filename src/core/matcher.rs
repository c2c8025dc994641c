//! Decides which listings describe which product.
//!
//! A listing belongs to a product when all three hold:
//! the listing manufacturer contains the product manufacturer,
//! some model variant appears in the title as a whole word,
//! and some family variant appears in the title as a substring.
//! All comparisons are case-insensitive.

use crate::core::normalizer::variants;
use crate::domain::model::{Listing, MatchGroup, Product};
use rayon::prelude::*;

fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// Case-insensitive substring test. The empty needle is contained everywhere.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    contains_folded(&fold(haystack), &fold(needle))
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.contains(needle)
}

/// Case-insensitive whole-word test: `word` must occur in `text` with a space
/// or the edge of the text on both sides. An empty `word` always matches.
pub fn contains_whole_word(text: &str, word: &str) -> bool {
    whole_word_folded(&fold(text), &fold(word))
}

fn whole_word_folded(text: &str, word: &str) -> bool {
    if word.is_empty() {
        return true;
    }

    // Occurrences may overlap ("ab ab" in "xab ab ab"), so resume one char
    // past the start of each rejected hit rather than past its end.
    let mut start = 0;
    while let Some(offset) = text[start..].find(word) {
        let begin = start + offset;
        let end = begin + word.len();

        let space_before = text[..begin].chars().next_back().map_or(true, |c| c == ' ');
        let space_after = text[end..].chars().next().map_or(true, |c| c == ' ');
        if space_before && space_after {
            return true;
        }

        start = begin + text[begin..].chars().next().map_or(1, char::len_utf8);
    }
    false
}

/// Listing fields that take part in matching, case-folded once per run.
#[derive(Debug, Clone)]
pub struct FoldedListing {
    title: String,
    manufacturer: Option<String>,
}

impl FoldedListing {
    pub fn new(listing: &Listing) -> Self {
        Self {
            title: fold(&listing.title),
            manufacturer: listing.manufacturer.as_deref().map(fold),
        }
    }
}

pub fn fold_listings(listings: &[Listing]) -> Vec<FoldedListing> {
    listings.iter().map(FoldedListing::new).collect()
}

/// Match criteria for one product with every variant already case-folded.
#[derive(Debug, Clone)]
struct Criteria {
    /// `None` when the product has no usable manufacturer; such a product matches nothing.
    manufacturer: Option<String>,
    models: Vec<String>,
    families: Vec<String>,
}

impl Criteria {
    fn new(product: &Product, model_variants: &[String], family_variants: &[String]) -> Self {
        let manufacturer = product
            .manufacturer
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .map(fold);

        Self {
            manufacturer,
            models: fold_variants(product.model.is_some(), model_variants),
            families: fold_variants(product.family.is_some(), family_variants),
        }
    }

    fn accepts(&self, listing: &FoldedListing) -> bool {
        let manufacturer_ok = match (&self.manufacturer, &listing.manufacturer) {
            (Some(wanted), Some(actual)) => contains_folded(actual, wanted),
            _ => false,
        };

        manufacturer_ok
            && self
                .models
                .iter()
                .any(|m| whole_word_folded(&listing.title, m))
            && self
                .families
                .iter()
                .any(|f| contains_folded(&listing.title, f))
    }
}

/// The empty variant only stands for "no constraint" when the identifier is
/// absent. A present identifier made of dashes and spaces yields no usable
/// spelling, so its product matches nothing on that dimension.
fn fold_variants(present: bool, variants: &[String]) -> Vec<String> {
    variants
        .iter()
        .filter(|v| !(present && v.is_empty()))
        .map(|v| fold(v))
        .collect()
}

/// Whether `listing` belongs to `product`, given the product's precomputed
/// model and family variants.
pub fn matches(
    listing: &Listing,
    product: &Product,
    model_variants: &[String],
    family_variants: &[String],
) -> bool {
    Criteria::new(product, model_variants, family_variants).accepts(&FoldedListing::new(listing))
}

/// One product's criteria, built once and applied to every listing.
#[derive(Debug, Clone)]
pub struct ProductMatcher {
    product_name: String,
    criteria: Criteria,
}

impl ProductMatcher {
    pub fn new(product: &Product) -> Self {
        let model_variants = variants(product.model.as_deref());
        let family_variants = variants(product.family.as_deref());

        if product.manufacturer.is_none() {
            tracing::debug!(
                "Product '{}' has no manufacturer and will not match any listing",
                product.product_name
            );
        }

        Self {
            product_name: product.product_name.clone(),
            criteria: Criteria::new(product, &model_variants, &family_variants),
        }
    }

    pub fn is_match(&self, listing: &FoldedListing) -> bool {
        self.criteria.accepts(listing)
    }

    /// Scans every listing in order. `folded` must be `fold_listings(listings)`.
    pub fn collect(&self, listings: &[Listing], folded: &[FoldedListing]) -> MatchGroup {
        debug_assert_eq!(listings.len(), folded.len());

        let matched: Vec<Listing> = listings
            .iter()
            .zip(folded)
            .filter(|(_, f)| self.is_match(f))
            .map(|(l, _)| l.clone())
            .collect();

        tracing::trace!(
            "Product '{}' matched {} listings",
            self.product_name,
            matched.len()
        );

        MatchGroup {
            product_name: self.product_name.clone(),
            listings: matched,
        }
    }
}

/// All listings belonging to a single product.
pub fn match_product(product: &Product, listings: &[Listing]) -> MatchGroup {
    let folded = fold_listings(listings);
    ProductMatcher::new(product).collect(listings, &folded)
}

/// One group per product, in product order. With `parallel` the products are
/// spread over the current rayon pool; the result is identical either way.
pub fn match_catalog(products: &[Product], listings: &[Listing], parallel: bool) -> Vec<MatchGroup> {
    let folded = fold_listings(listings);

    if parallel {
        products
            .par_iter()
            .map(|product| ProductMatcher::new(product).collect(listings, &folded))
            .collect()
    } else {
        products
            .iter()
            .map(|product| ProductMatcher::new(product).collect(listings, &folded))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(title: &str, manufacturer: &str) -> Listing {
        Listing {
            title: title.to_string(),
            manufacturer: Some(manufacturer.to_string()),
            currency: Some("CAD".to_string()),
            price: Some("99.99".to_string()),
        }
    }

    fn product(name: &str, manufacturer: Option<&str>, family: Option<&str>, model: Option<&str>) -> Product {
        Product {
            product_name: name.to_string(),
            manufacturer: manufacturer.map(str::to_string),
            model: model.map(str::to_string),
            family: family.map(str::to_string),
            announced_date: None,
        }
    }

    fn check(listing: &Listing, product: &Product) -> bool {
        let models = variants(product.model.as_deref());
        let families = variants(product.family.as_deref());
        matches(listing, product, &models, &families)
    }

    #[test]
    fn test_whole_word_in_middle() {
        assert!(contains_whole_word("Canon PowerShot A95 Digital Camera", "A95"));
    }

    #[test]
    fn test_whole_word_rejects_longer_token() {
        assert!(!contains_whole_word("Canon PowerShot A950", "A95"));
        assert!(!contains_whole_word("Canon PowerShot XA95", "A95"));
    }

    #[test]
    fn test_whole_word_at_edges() {
        assert!(contains_whole_word("A95 Camera", "A95"));
        assert!(contains_whole_word("Camera A95", "A95"));
        assert!(contains_whole_word("A95", "A95"));
    }

    #[test]
    fn test_whole_word_is_case_insensitive() {
        assert!(contains_whole_word("canon powershot a95", "A95"));
    }

    #[test]
    fn test_whole_word_only_spaces_are_boundaries() {
        assert!(!contains_whole_word("Canon A95, black", "A95"));
        assert!(!contains_whole_word("Canon (A95)", "A95"));
        assert!(!contains_whole_word("Canon\tA95", "A95"));
    }

    #[test]
    fn test_whole_word_finds_later_occurrence() {
        assert!(contains_whole_word("A950 kit with A95 body", "A95"));
    }

    #[test]
    fn test_whole_word_overlapping_occurrence() {
        assert!(contains_whole_word("xab ab ab", "ab ab"));
    }

    #[test]
    fn test_whole_word_empty_needle_and_short_text() {
        assert!(contains_whole_word("anything", ""));
        assert!(contains_whole_word("", ""));
        assert!(!contains_whole_word("A9", "A95"));
        assert!(!contains_whole_word("", "A95"));
    }

    #[test]
    fn test_whole_word_non_ascii_neighbours() {
        assert!(!contains_whole_word("éA95", "A95"));
        assert!(contains_whole_word("Appareil é A95", "A95"));
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("CANON Canada", "canon"));
        assert!(contains_ignore_case("Canon", ""));
        assert!(!contains_ignore_case("Nikon", "Canon"));
    }

    #[test]
    fn test_manufacturer_is_case_insensitive_substring() {
        let p = product("Canon_A95", Some("Canon"), Some("PowerShot"), Some("A95"));
        assert!(check(&listing("PowerShot A95", "CANON"), &p));
        assert!(check(&listing("PowerShot A95", "Canon Canada"), &p));
        assert!(!check(&listing("PowerShot A95", "Nikon"), &p));
    }

    #[test]
    fn test_absent_product_manufacturer_never_matches() {
        let p = product("Mystery_A95", None, Some("PowerShot"), Some("A95"));
        assert!(!check(&listing("Canon PowerShot A95", "Canon"), &p));
        assert!(!check(&listing("Canon PowerShot A95", ""), &p));
    }

    #[test]
    fn test_blank_product_manufacturer_never_matches() {
        let p = product("Blank_A95", Some("  "), Some("PowerShot"), Some("A95"));
        assert!(!check(&listing("Canon PowerShot A95", "Canon"), &p));
    }

    #[test]
    fn test_absent_listing_manufacturer_never_matches() {
        let p = product("Canon_A95", Some("Canon"), None, Some("A95"));
        let mut l = listing("Canon PowerShot A95", "Canon");
        l.manufacturer = None;
        assert!(!check(&l, &p));
    }

    #[test]
    fn test_absent_family_does_not_exclude() {
        let p = product("Canon_A95", Some("Canon"), None, Some("A95"));
        assert!(check(&listing("A95", "Canon"), &p));
        assert!(check(&listing("Some unrelated words A95 here", "Canon"), &p));
    }

    #[test]
    fn test_absent_model_does_not_exclude() {
        let p = product("Canon_PowerShot", Some("Canon"), Some("PowerShot"), None);
        assert!(check(&listing("Canon PowerShot anything", "Canon"), &p));
        assert!(!check(&listing("Canon IXUS anything", "Canon"), &p));
    }

    #[test]
    fn test_separator_only_model_matches_nothing() {
        let p = product("Canon_Dash", Some("Canon"), None, Some("-"));
        assert!(!check(&listing("Canon PowerShot A95", "Canon"), &p));
        assert!(!check(&listing("Canon IXUS 120 IS", "Canon"), &p));

        let p = product("Canon_Blank", Some("Canon"), None, Some(""));
        assert!(!check(&listing("Canon PowerShot A95", "Canon"), &p));
    }

    #[test]
    fn test_separator_only_family_matches_nothing() {
        let p = product("Canon_A95", Some("Canon"), Some("--"), Some("A95"));
        assert!(!check(&listing("Canon PowerShot A95", "Canon"), &p));
    }

    #[test]
    fn test_family_is_plain_substring() {
        let p = product("Canon_A95", Some("Canon"), Some("Shot"), Some("A95"));
        assert!(check(&listing("Canon PowerShot A95", "Canon"), &p));
    }

    #[test]
    fn test_family_and_model_variants() {
        let p = product("Sony_DSC-W310", Some("Sony"), Some("Cyber-shot"), Some("DSC-W310"));
        assert!(check(&listing("Sony Cybershot DSCW310 12MP", "Sony"), &p));
        assert!(check(&listing("Sony Cyber shot DSC W310", "Sony"), &p));
        assert!(!check(&listing("Sony Cybershot DSC-W3100", "Sony"), &p));
    }

    #[test]
    fn test_end_to_end_scenario() {
        let p = product("Canon PowerShot A95", Some("Canon"), Some("PowerShot"), Some("A95"));
        let listings = vec![
            listing("Canon PowerShot A95 Digital Camera", "Canon"),
            listing("Canon PowerShot A950", "Canon"),
            listing("Nikon Coolpix A95", "Nikon"),
        ];

        let group = match_product(&p, &listings);
        assert_eq!(group.product_name, "Canon PowerShot A95");
        assert_eq!(group.listings, vec![listings[0].clone()]);
    }

    #[test]
    fn test_listing_may_match_several_products() {
        let products = vec![
            product("Canon_A95", Some("Canon"), None, Some("A95")),
            product("Canon_PowerShot", Some("Canon"), Some("PowerShot"), None),
        ];
        let listings = vec![listing("Canon PowerShot A95", "Canon")];

        let groups = match_catalog(&products, &listings, false);
        assert_eq!(groups[0].listings.len(), 1);
        assert_eq!(groups[1].listings.len(), 1);
    }

    #[test]
    fn test_catalog_keeps_empty_groups_in_order() {
        let products = vec![
            product("first", Some("Nikon"), None, Some("D90")),
            product("second", Some("Canon"), None, Some("A95")),
            product("third", None, None, None),
        ];
        let listings = vec![listing("Canon A95", "Canon")];

        let groups = match_catalog(&products, &listings, true);
        let names: Vec<&str> = groups.iter().map(|g| g.product_name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
        assert!(groups[0].listings.is_empty());
        assert_eq!(groups[1].listings.len(), 1);
        assert!(groups[2].listings.is_empty());
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let products: Vec<Product> = (0..50)
            .map(|i| product(&format!("p{}", i), Some("Canon"), None, Some(format!("A{}", i).as_str())))
            .collect();
        let listings: Vec<Listing> = (0..50)
            .map(|i| listing(&format!("Canon PowerShot A{} kit", i % 25), "Canon"))
            .collect();

        assert_eq!(
            match_catalog(&products, &listings, true),
            match_catalog(&products, &listings, false)
        );
    }

    #[test]
    fn test_product_matcher_folds_case() {
        let p = product("Canon_A95", Some("Canon"), None, Some("A95"));
        let matcher = ProductMatcher::new(&p);
        assert!(matcher.is_match(&FoldedListing::new(&listing("canon a95", "canon"))));
    }
}
