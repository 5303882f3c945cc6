use tax_core::DeductionCategory;

/// Maps a statutory section code, or one of the estimator's own category
/// codes, to a deduction category.
///
/// Matching ignores case and whitespace, and a leading "Section"/"Sec." is
/// dropped, so `"sec 80c"` and `"80C"` are equivalent.
///
/// | Codes | Category |
/// |-------|----------|
/// | `80C` | Section 80C |
/// | `80D` | Section 80D |
/// | `80G` | Section 80G |
/// | `24`, `24B`, `24(B)` | Home loan interest |
/// | `80E` | Education loan interest |
/// | `80CCD`, `80CCD(1)`, `80CCD(1B)`, `80CCD(2)` | NPS |
/// | `10(13A)`, `HRA` | HRA exemption |
pub fn category_for_section(code: &str) -> Option<DeductionCategory> {
    if let Some(category) = DeductionCategory::parse(&code.trim().to_ascii_lowercase()) {
        return Some(category);
    }

    let normalized: String = code
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase();
    let normalized = normalized
        .strip_prefix("SECTION")
        .or_else(|| normalized.strip_prefix("SEC."))
        .or_else(|| normalized.strip_prefix("SEC"))
        .unwrap_or(normalized.as_str());

    match normalized {
        "80C" => Some(DeductionCategory::Section80C),
        "80D" => Some(DeductionCategory::Section80D),
        "80G" => Some(DeductionCategory::Section80G),
        "24" | "24B" | "24(B)" => Some(DeductionCategory::HomeLoanInterest),
        "80E" => Some(DeductionCategory::EducationLoanInterest),
        "80CCD" | "80CCD(1)" | "80CCD(1B)" | "80CCD(2)" => Some(DeductionCategory::Nps),
        "10(13A)" | "HRA" => Some(DeductionCategory::HraExemption),
        _ => None,
    }
}
