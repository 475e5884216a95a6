//! Label interpretation: maps raw classifier labels to localized Arabic
//! diagnoses and static treatment suggestions, gated by a confidence
//! threshold.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Displayed confidence (percent) below which the diagnosis is overridden to
/// an "uncertain" indicator. Exclusive: exactly 70.0 counts as confident.
pub const CONFIDENCE_THRESHOLD: f64 = 70.0;

pub const UNCERTAIN_DIAGNOSIS: &str = "غير مؤكد ⚠️";

pub const TREATMENT_HEALTHY: &str =
    "النبات يبدو سليماً. استمر في العناية الجيدة والري المنتظم.";
pub const TREATMENT_FUNGAL: &str =
    "قم بإزالة الأوراق المصابة، تجنب الري من الأعلى، استخدم مبيداً فطرياً، وفكّر في تبديل المحصول.";
pub const TREATMENT_BACTERIAL: &str =
    "إزالة الأوراق المصابة، استخدام مبيد بكتيري مناسب، وتحسين التهوية.";
pub const TREATMENT_VIRAL: &str =
    "الفيروسات صعبة العلاج. أزل النباتات المصابة وقم بمكافحة الحشرات الناقلة.";
pub const TREATMENT_PEST: &str = "استخدم صابوناً زراعياً أو زيت النيم لمكافحة العث.";
pub const TREATMENT_GENERIC: &str = "استشر متخصصاً زراعياً للتشخيص الدقيق والعلاج المناسب.";

/// One ranked classifier result. Only the top entry is ever consulted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// Rendered outcome for the top-ranked result.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpretation {
    pub diagnosis: String,
    /// Percent on a 0-100 scale, rounded to one decimal.
    pub confidence: f64,
    pub treatment: String,
    pub uncertain: bool,
}

static DIAGNOSIS_AR: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("tomato early blight", "اللفحة المبكرة في الطماطم"),
        ("tomato late blight", "اللفحة المتأخرة في الطماطم"),
        ("tomato bacterial spot", "البقعة البكتيرية في الطماطم"),
        ("tomato leaf mold", "عفن الأوراق في الطماطم"),
        ("tomato septoria leaf spot", "بقعة سبتوريا في الطماطم"),
        ("tomato spider mites two spotted spider mite", "عث العنكبوت في الطماطم"),
        ("tomato spider mites", "عث العنكبوت في الطماطم"),
        ("tomato target spot", "البقعة الهدفية في الطماطم"),
        ("tomato yellow leaf curl virus", "فيروس تجعد الأوراق الأصفر"),
        ("tomato tomato mosaic virus", "فيروس موزاييك الطماطم"),
        ("tomato healthy", "طماطم سليمة ✅"),
        ("potato early blight", "اللفحة المبكرة في البطاطس"),
        ("potato late blight", "اللفحة المتأخرة في البطاطس"),
        ("potato healthy", "بطاطس سليمة ✅"),
        ("apple apple scab", "الجلبة في التفاح"),
        ("apple black rot", "العفن الأسود في التفاح"),
        ("apple cedar apple rust", "صدأ الأرز والتفاح"),
        ("apple healthy", "تفاح سليم ✅"),
        ("corn cercospora leaf spot gray leaf spot", "بقعة أوراق سيركوسبورا في الذرة"),
        ("corn common rust", "الصدأ الشائع في الذرة"),
        ("corn northern leaf blight", "اللفحة الشمالية لأوراق الذرة"),
        ("corn maize healthy", "ذرة سليمة ✅"),
        ("grape black rot", "العفن الأسود في العنب"),
        ("grape esca black measles", "إسكا (الحصبة السوداء) في العنب"),
        ("grape leaf blight isariopsis leaf spot", "لفحة أوراق العنب"),
        ("grape healthy", "عنب سليم ✅"),
        ("orange haunglongbing citrus greening", "مرض الاخضرار في الحمضيات"),
        ("peach bacterial spot", "البقعة البكتيرية في الخوخ"),
        ("peach healthy", "خوخ سليم ✅"),
        ("pepper bell bacterial spot", "البقعة البكتيرية في الفلفل"),
        ("pepper bell healthy", "فلفل سليم ✅"),
        ("strawberry leaf scorch", "حرق أوراق الفراولة"),
        ("strawberry healthy", "فراولة سليمة ✅"),
        ("cherry including sour powdery mildew", "البياض الدقيقي في الكرز"),
        ("cherry including sour healthy", "كرز سليم ✅"),
        ("squash powdery mildew", "البياض الدقيقي في القرع"),
        ("blueberry healthy", "توت سليم ✅"),
        ("raspberry healthy", "توت العليق سليم ✅"),
        ("soybean healthy", "فول صويا سليم ✅"),
    ])
});

/// Lowercase, underscore runs to single spaces, whitespace collapsed,
/// trimmed. `"Tomato___Early_blight"` becomes `"tomato early blight"`.
pub fn normalize_label(label: &str) -> String {
    label
        .to_lowercase()
        .replace("___", " ")
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Localized diagnosis for a raw label. Dictionary miss retries with
/// `" with "` removed (handles "X with Y" label variants); a second miss
/// falls back to the raw label with underscores replaced by spaces.
pub fn diagnosis_for(label: &str) -> String {
    let key = normalize_label(label);
    if let Some(diagnosis) = DIAGNOSIS_AR.get(key.as_str()) {
        return (*diagnosis).to_string();
    }
    let key_no_with = key.replace(" with ", " ");
    if let Some(diagnosis) = DIAGNOSIS_AR.get(key_no_with.as_str()) {
        return (*diagnosis).to_string();
    }
    label.replace('_', " ")
}

/// Score in [0,1] scaled to percent and rounded to one decimal.
pub fn display_confidence(score: f64) -> f64 {
    (score * 1000.0).round() / 10.0
}

/// Static treatment suggestion chosen by ordered keyword match on the raw
/// label. First matching rule wins, so "blight" beats "spot" when a label
/// carries both.
pub fn treatment_for(label: &str) -> &'static str {
    let lower = label.to_lowercase();
    if lower.contains("healthy") {
        TREATMENT_HEALTHY
    } else if lower.contains("blight") || lower.contains("mold") || lower.contains("rust") {
        TREATMENT_FUNGAL
    } else if lower.contains("bacterial") || lower.contains("spot") {
        TREATMENT_BACTERIAL
    } else if lower.contains("virus") || lower.contains("mosaic") {
        TREATMENT_VIRAL
    } else if lower.contains("mites") || lower.contains("spider") {
        TREATMENT_PEST
    } else {
        TREATMENT_GENERIC
    }
}

fn low_confidence_warning(confidence: f64) -> String {
    format!(
        "⚠️ تنبيه: نسبة الثقة منخفضة ({confidence:.1}%)\n\
         الذكاء الاصطناعي غير متأكد. يرجى تصوير \"ورقة\" النبات بوضوح. \
         النظام يدعم أوراق (الطماطم، البطاطس، العنب، التفاح...) فقط."
    )
}

/// Interpret the top-ranked classifier result. Below the threshold the
/// diagnosis is overridden to the uncertain indicator and the treatment is
/// replaced by the warning, regardless of dictionary contents.
pub fn interpret_top(label: &str, score: f64) -> Interpretation {
    let confidence = display_confidence(score);
    if confidence < CONFIDENCE_THRESHOLD {
        Interpretation {
            diagnosis: UNCERTAIN_DIAGNOSIS.to_string(),
            confidence,
            treatment: low_confidence_warning(confidence),
            uncertain: true,
        }
    } else {
        Interpretation {
            diagnosis: diagnosis_for(label),
            confidence,
            treatment: treatment_for(label).to_string(),
            uncertain: false,
        }
    }
}
