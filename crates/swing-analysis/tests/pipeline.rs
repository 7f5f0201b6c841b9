//! End-to-end pipeline scenarios with synthetic sources and detectors.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::watch;

use swing_analysis::{
    AnalysisConfig, AnalysisError, AnalysisProgress, Analyzer, AnalyzerState, FrameImage,
    PipelineResult, PoseDetector, VideoSource,
};
use swing_models::{Joint, Landmark, PoseFrame, SwingCategory};

/// Rotate a unit vector by `deg` degrees.
fn rotate(v: (f64, f64), deg: f64) -> (f64, f64) {
    let r = deg.to_radians();
    (
        v.0 * r.cos() - v.1 * r.sin(),
        v.0 * r.sin() + v.1 * r.cos(),
    )
}

/// Build a pose whose computed angles are exactly the requested ones.
///
/// Left and right landmarks coincide, so midpoints equal the chain
/// points and the side tie resolves to the default.
fn synthetic_pose(trunk_lean: f64, hip_angle: f64, knee_angle: f64, visibility: f64) -> PoseFrame {
    let hip = (0.5, 0.45);

    // Trunk: hip -> shoulder at `trunk_lean` degrees from vertical up.
    let up = (trunk_lean.to_radians().sin(), -trunk_lean.to_radians().cos());
    let shoulder = (hip.0 + 0.25 * up.0, hip.1 + 0.25 * up.1);

    // Hip angle: knee ray rotated from the shoulder ray at the hip.
    let knee_dir = rotate(up, hip_angle);
    let knee = (hip.0 + 0.25 * knee_dir.0, hip.1 + 0.25 * knee_dir.1);

    // Knee angle: ankle ray rotated from the hip ray at the knee.
    let back = (-knee_dir.0, -knee_dir.1);
    let ankle_dir = rotate(back, knee_angle);
    let ankle = (knee.0 + 0.2 * ankle_dir.0, knee.1 + 0.2 * ankle_dir.1);

    let mut pose = PoseFrame::new();
    for (left, right, point) in [
        (Joint::LeftShoulder, Joint::RightShoulder, shoulder),
        (Joint::LeftHip, Joint::RightHip, hip),
        (Joint::LeftKnee, Joint::RightKnee, knee),
        (Joint::LeftAnkle, Joint::RightAnkle, ankle),
    ] {
        pose.insert(left, Landmark::new(point.0, point.1, visibility));
        pose.insert(right, Landmark::new(point.0, point.1, visibility));
    }
    pose
}

struct FakeSource {
    duration: f64,
    dimensions: Option<(u32, u32)>,
    seeks: usize,
    fail_seek_at: Option<usize>,
}

impl FakeSource {
    fn new(duration: f64) -> Self {
        Self {
            duration,
            dimensions: Some((1080, 1920)),
            seeks: 0,
            fail_seek_at: None,
        }
    }
}

#[async_trait]
impl VideoSource for FakeSource {
    fn duration(&self) -> f64 {
        self.duration
    }

    fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    async fn seek(&mut self, t: f64) -> PipelineResult<()> {
        let index = self.seeks;
        self.seeks += 1;
        if self.fail_seek_at == Some(index) {
            return Err(AnalysisError::Seek { timestamp: t });
        }
        Ok(())
    }

    fn current_frame(&self) -> FrameImage {
        FrameImage(self.seeks as u64 - 1)
    }
}

struct FakeDetector {
    poses: Vec<Option<PoseFrame>>,
    closed: Arc<AtomicBool>,
    fail_detect_at: Option<usize>,
    fatal_detect_at: Option<usize>,
}

impl FakeDetector {
    fn new(poses: Vec<Option<PoseFrame>>) -> (Self, Arc<AtomicBool>) {
        let closed = Arc::new(AtomicBool::new(false));
        (
            Self {
                poses,
                closed: closed.clone(),
                fail_detect_at: None,
                fatal_detect_at: None,
            },
            closed,
        )
    }

    fn uniform(pose: PoseFrame, count: usize) -> (Self, Arc<AtomicBool>) {
        Self::new(vec![Some(pose); count])
    }
}

#[async_trait]
impl PoseDetector for FakeDetector {
    async fn detect(
        &mut self,
        frame: FrameImage,
        _timestamp_ms: i64,
    ) -> PipelineResult<Option<PoseFrame>> {
        let index = frame.0 as usize;
        if self.fail_detect_at == Some(index) {
            return Err(AnalysisError::detection("inference failed"));
        }
        if self.fatal_detect_at == Some(index) {
            return Err(AnalysisError::detector_init("model backend lost"));
        }
        Ok(self.poses.get(index).cloned().unwrap_or_default())
    }

    async fn close(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

fn ready_analyzer(duration: f64) -> Analyzer<FakeSource> {
    let mut analyzer = Analyzer::new(AnalysisConfig::default());
    analyzer.load_video(FakeSource::new(duration)).unwrap();
    analyzer
}

#[tokio::test]
async fn scenario_a_ramp_from_five_to_thirty_five_degrees() {
    // 10 seconds at 6 fps: 60 samples, trunk lean ramping 5 -> 35.
    let poses: Vec<Option<PoseFrame>> = (0..60)
        .map(|i| {
            let lean = 5.0 + 30.0 * i as f64 / 59.0;
            Some(synthetic_pose(lean, 160.0, 165.0, 1.0))
        })
        .collect();
    let (detector, closed) = FakeDetector::new(poses);

    let progress_log: Arc<Mutex<Vec<AnalysisProgress>>> = Arc::new(Mutex::new(Vec::new()));
    let log = progress_log.clone();
    let mut analyzer = Analyzer::new(AnalysisConfig::default())
        .with_progress(Box::new(move |p| log.lock().unwrap().push(p)));
    analyzer.load_video(FakeSource::new(10.0)).unwrap();

    let result = analyzer
        .analyze(detector, SwingCategory::ForwardRising)
        .await
        .unwrap();

    assert_eq!(result.total_sampled_frames, 60);
    assert_eq!(result.used_frame_count, 60);
    assert!((result.avg.trunk_lean_deg - 20.0).abs() < 1e-6);
    assert!((result.peak.trunk_lean_deg() - 35.0).abs() < 1e-6);
    assert!((result.peak.t() - 59.0 / 6.0).abs() < 1e-9);

    // Average lean of 20 is inside the good band (12..25).
    assert!(result.message.contains("前傾姿勢は概ね良好です"));
    assert!(result.message.contains("平均前傾角 20.0°"));
    assert!(result.message.contains("最大前傾角 35.0°"));

    // Progress covers every sampled frame and increases monotonically.
    let progress = progress_log.lock().unwrap();
    assert_eq!(progress.len(), 60);
    assert!(progress
        .windows(2)
        .all(|w| w[0].current_frame < w[1].current_frame));
    assert_eq!(progress.last().unwrap().current_frame, 60);
    assert_eq!(progress.last().unwrap().total_frames, 60);
    assert!((progress.last().unwrap().percentage() - 100.0).abs() < 1e-9);

    assert_eq!(analyzer.state(), AnalyzerState::Done);
    assert!(closed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn scenario_b_all_frames_below_gate_is_no_valid_frames() {
    let (detector, closed) = FakeDetector::uniform(synthetic_pose(20.0, 160.0, 165.0, 0.2), 60);
    let mut analyzer = ready_analyzer(10.0);

    let err = analyzer
        .analyze(detector, SwingCategory::ForwardSinking)
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::NoValidFrames));
    // The video stays loaded so the user can retry.
    assert_eq!(analyzer.state(), AnalyzerState::Ready);
    assert!(closed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn scenario_c_category_three_with_shallow_hip_fold() {
    let category = SwingCategory::parse("Ⅲ").unwrap();
    let (detector, _closed) = FakeDetector::uniform(synthetic_pose(20.0, 140.0, 165.0, 0.9), 60);
    let mut analyzer = ready_analyzer(10.0);

    let result = analyzer.analyze(detector, category).await.unwrap();

    assert!((result.avg.hip_angle_deg - 140.0).abs() < 1e-6);
    assert!(result.message.contains("股関節の折りが浅めです"));
    assert!(result
        .message
        .contains("体重移動が弱く、伸び上がりやすい。軸で回ってミートの再現性を上げよう。"));
    assert_eq!(result.next_drill, "骨盤先行→上体は我慢（ティー10本）");
}

#[tokio::test]
async fn failed_seek_skips_the_frame_but_not_the_run() {
    let (detector, _closed) = FakeDetector::uniform(synthetic_pose(20.0, 160.0, 165.0, 0.9), 60);
    let mut source = FakeSource::new(10.0);
    source.fail_seek_at = Some(3);

    let progress_log: Arc<Mutex<Vec<AnalysisProgress>>> = Arc::new(Mutex::new(Vec::new()));
    let log = progress_log.clone();
    let mut analyzer = Analyzer::new(AnalysisConfig::default())
        .with_progress(Box::new(move |p| log.lock().unwrap().push(p)));
    analyzer.load_video(source).unwrap();

    let result = analyzer
        .analyze(detector, SwingCategory::BackwardSinking)
        .await
        .unwrap();

    assert_eq!(result.total_sampled_frames, 60);
    assert_eq!(result.used_frame_count, 59);
    // Progress still advances past the skipped frame.
    assert_eq!(progress_log.lock().unwrap().len(), 60);
}

#[tokio::test]
async fn failed_detection_skips_the_frame_but_not_the_run() {
    let (mut detector, _closed) =
        FakeDetector::uniform(synthetic_pose(20.0, 160.0, 165.0, 0.9), 60);
    detector.fail_detect_at = Some(7);

    let progress_log: Arc<Mutex<Vec<AnalysisProgress>>> = Arc::new(Mutex::new(Vec::new()));
    let log = progress_log.clone();
    let mut analyzer = Analyzer::new(AnalysisConfig::default())
        .with_progress(Box::new(move |p| log.lock().unwrap().push(p)));
    analyzer.load_video(FakeSource::new(10.0)).unwrap();

    let result = analyzer
        .analyze(detector, SwingCategory::ForwardRising)
        .await
        .unwrap();

    assert_eq!(result.total_sampled_frames, 60);
    assert_eq!(result.used_frame_count, 59);
    // The failed inference still counts toward progress.
    assert_eq!(progress_log.lock().unwrap().len(), 60);
    assert_eq!(analyzer.state(), AnalyzerState::Done);
}

#[tokio::test]
async fn fatal_detector_error_aborts_to_ready() {
    let (mut detector, closed) =
        FakeDetector::uniform(synthetic_pose(20.0, 160.0, 165.0, 0.9), 60);
    detector.fatal_detect_at = Some(7);
    let mut analyzer = ready_analyzer(10.0);

    let err = analyzer
        .analyze(detector, SwingCategory::ForwardRising)
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::DetectorInit(_)));
    // The video stays loaded; only the run is lost.
    assert_eq!(analyzer.state(), AnalyzerState::Ready);
    assert!(closed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn cancellation_mid_run_discards_everything() {
    let (detector, closed) = FakeDetector::uniform(synthetic_pose(20.0, 160.0, 165.0, 0.9), 60);
    let (cancel_tx, cancel_rx) = watch::channel(false);

    let mut analyzer = Analyzer::new(AnalysisConfig::default())
        .with_progress(Box::new(move |p| {
            if p.current_frame == 5 {
                let _ = cancel_tx.send(true);
            }
        }))
        .with_cancel(cancel_rx);
    analyzer.load_video(FakeSource::new(10.0)).unwrap();

    let err = analyzer
        .analyze(detector, SwingCategory::ForwardRising)
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::Cancelled));
    assert_eq!(analyzer.state(), AnalyzerState::Ready);
    assert!(closed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn analyze_outside_ready_state_is_rejected() {
    let (detector, closed) = FakeDetector::uniform(synthetic_pose(20.0, 160.0, 165.0, 0.9), 1);
    let mut analyzer: Analyzer<FakeSource> = Analyzer::new(AnalysisConfig::default());

    let err = analyzer
        .analyze(detector, SwingCategory::ForwardRising)
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::InvalidState { .. }));
    assert_eq!(analyzer.state(), AnalyzerState::Idle);
    assert!(closed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn unresolvable_duration_returns_to_idle() {
    let mut analyzer = Analyzer::new(AnalysisConfig::default());
    let err = analyzer.load_video(FakeSource::new(0.0)).unwrap_err();
    assert!(matches!(err, AnalysisError::SourceUnavailable(_)));
    assert_eq!(analyzer.state(), AnalyzerState::Idle);
}

#[tokio::test]
async fn missing_dimensions_fall_back_to_defaults() {
    let mut source = FakeSource::new(4.0);
    source.dimensions = None;
    let mut analyzer = Analyzer::new(AnalysisConfig::default());
    let meta = analyzer.load_video(source).unwrap();
    assert_eq!((meta.width, meta.height), (720, 1280));
}

#[tokio::test]
async fn repeated_runs_on_the_same_input_are_metric_identical() {
    let poses: Vec<Option<PoseFrame>> = (0..30)
        .map(|i| {
            let lean = 10.0 + i as f64 * 0.5;
            Some(synthetic_pose(lean, 158.0, 170.0, 0.85))
        })
        .collect();

    let mut results = Vec::new();
    for _ in 0..2 {
        let (detector, _closed) = FakeDetector::new(poses.clone());
        let mut analyzer = ready_analyzer(5.0);
        results.push(
            analyzer
                .analyze(detector, SwingCategory::ForwardSinking)
                .await
                .unwrap(),
        );
    }

    assert_eq!(results[0].avg, results[1].avg);
    assert_eq!(results[0].peak, results[1].peak);
    assert_eq!(results[0].message, results[1].message);
    assert_eq!(results[0].next_drill, results[1].next_drill);
}
