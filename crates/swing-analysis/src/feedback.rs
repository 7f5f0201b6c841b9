//! Category-conditioned coaching feedback.
//!
//! The message is an ordered list of lines joined by newlines: two
//! metric headlines, one commentary line per angle, one category
//! remark, and a fixed closing line. Each category carries two
//! synonymous remark and drill variants; which variant is used goes
//! through an injectable [`VariantPicker`] so tests can pin the output.

use crate::config::AnalysisConfig;
use swing_models::{AggregateMetrics, PeakRecord, SwingCategory};

/// Chooses among synonymous phrasing variants.
pub trait VariantPicker {
    /// Pick an index in `0..len`.
    fn pick(&mut self, len: usize) -> usize;
}

/// Always picks the first variant. The deterministic default.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstVariant;

impl VariantPicker for FirstVariant {
    fn pick(&mut self, _len: usize) -> usize {
        0
    }
}

/// Generated coaching text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    /// Newline-separated coaching message
    pub message: String,
    /// Suggested follow-up drill
    pub next_drill: String,
}

/// Per-category remark and drill variants.
struct CategoryTemplate {
    remarks: [&'static str; 2],
    drills: [&'static str; 2],
}

const FORWARD_RISING: CategoryTemplate = CategoryTemplate {
    remarks: [
        "前傾が早く出やすいので、トップ位置を作ってから打ちにいく意識が最優先。",
        "ポイントが前に出やすい。まずは“待てる形”を作って、タイミングを遅らせよう。",
    ],
    drills: [
        "トップ固定→1呼吸→スイング（ティー10本）",
        "ノーステップで“待つ”練習（ティー10本）",
    ],
};

const FORWARD_SINKING: CategoryTemplate = CategoryTemplate {
    remarks: [
        "沈み込みが入りやすい。下半身の支えを作って、沈みを“保ったまま”回そう。",
        "詰まりやすい傾向。沈む→止まる にならないように、回転につなげたい。",
    ],
    drills: [
        "片足タッチ→戻す→スイング（ティー10本）",
        "膝を残して回る（ミニスイング10本）",
    ],
};

const BACKWARD_RISING: CategoryTemplate = CategoryTemplate {
    remarks: [
        "体重移動が弱く、伸び上がりやすい。軸で回ってミートの再現性を上げよう。",
        "後ろに伸びやすい。骨盤の回転を先に出して、上体は後から付いてくる形に。",
    ],
    drills: [
        "骨盤先行→上体は我慢（ティー10本）",
        "壁当て（お尻）→回転（素振り10回）",
    ],
};

const BACKWARD_SINKING: CategoryTemplate = CategoryTemplate {
    remarks: [
        "しまい込みが出やすい。振り切って止めない回転を作るのが鍵。",
        "弾道が乱れやすい。体幹のコントロールで“最後まで回り切る”を優先。",
    ],
    drills: [
        "フィニッシュ静止3秒（ティー10本）",
        "回転で振り切る（素振り10回→ティー5本）",
    ],
};

fn template(category: SwingCategory) -> &'static CategoryTemplate {
    match category {
        SwingCategory::ForwardRising => &FORWARD_RISING,
        SwingCategory::ForwardSinking => &FORWARD_SINKING,
        SwingCategory::BackwardRising => &BACKWARD_RISING,
        SwingCategory::BackwardSinking => &BACKWARD_SINKING,
    }
}

/// Closing line appended to every message.
pub const CLOSING_LINE: &str = "今後のアップデートで体重移動・タイミング指標も追加予定です。";

fn trunk_line(avg_trunk: f64, thresholds: (f64, f64)) -> &'static str {
    let (upright_below, excessive_above) = thresholds;
    if avg_trunk > excessive_above {
        "前傾が強すぎます。上体の突っ込みを抑えて、トップの姿勢をキープしましょう。"
    } else if avg_trunk < upright_below {
        "上体が立ちすぎています。もう少し前傾を作って構えましょう。"
    } else {
        "前傾姿勢は概ね良好です。この角度を維持しましょう。"
    }
}

fn hip_line(avg_hip: f64, thresholds: (f64, f64)) -> &'static str {
    let (fold_below, extend_above) = thresholds;
    if avg_hip < fold_below {
        "股関節の折りが浅めです。骨盤から倒す意識を持ちましょう。"
    } else if avg_hip > extend_above {
        "股関節が伸びすぎています。突っ立ちに注意しましょう。"
    } else {
        "股関節の使い方は概ね良好です。"
    }
}

fn knee_line(avg_knee: f64, thresholds: (f64, f64)) -> &'static str {
    let (fold_below, extend_above) = thresholds;
    if avg_knee < fold_below {
        "膝の曲げが浅めです。下半身で支える意識を持ちましょう。"
    } else if avg_knee > extend_above {
        "膝が伸びすぎています。軽く曲げて粘りを作りましょう。"
    } else {
        "膝の使い方は概ね良好です。"
    }
}

/// Generate the coaching message and drill for one completed run.
///
/// Pure function of its inputs; the only degree of freedom is which
/// synonymous variant `picker` selects, and that never changes the
/// metric lines.
pub fn generate_feedback(
    config: &AnalysisConfig,
    category: SwingCategory,
    avg: &AggregateMetrics,
    peak: &PeakRecord,
    picker: &mut dyn VariantPicker,
) -> Feedback {
    let template = template(category);
    let remark = template.remarks[picker.pick(template.remarks.len())];
    let next_drill = template.drills[picker.pick(template.drills.len())].to_string();

    let lines = [
        format!(
            "平均前傾角 {:.1}°、最大前傾角 {:.1}°（{:.2}秒時点）。",
            avg.trunk_lean_deg,
            peak.trunk_lean_deg(),
            peak.t()
        ),
        format!(
            "平均股関節角 {:.1}°、平均膝角 {:.1}°。",
            avg.hip_angle_deg, avg.knee_angle_deg
        ),
        trunk_line(avg.trunk_lean_deg, config.trunk_thresholds).to_string(),
        hip_line(avg.hip_angle_deg, config.joint_thresholds).to_string(),
        knee_line(avg.knee_angle_deg, config.joint_thresholds).to_string(),
        remark.to_string(),
        CLOSING_LINE.to_string(),
    ];

    Feedback {
        message: lines.join("\n"),
        next_drill,
    }
}
