use crate::config;
use cleanspot_core::{
    entities::Verdict,
    gateways::judge::{JudgeRequest, JudgeUnavailable, VerificationJudge},
};
use cleanspot_gateways::{
    file_store::FsImageStore,
    judge::{HttpJudge, JudgeConfig},
};

pub fn judge_gateway(cfg: &config::Judge) -> JudgeGw {
    let Some(api_key) = &cfg.api_key else {
        log::warn!("No judge API key was configured: verification events will fail as unavailable");
        return JudgeGw::new(UnconfiguredJudge);
    };
    let judge_config = JudgeConfig {
        api_url: cfg.api_url.clone(),
        api_key: api_key.clone(),
        model: cfg.model.clone(),
        timeout: cfg.timeout,
        max_image_edge: cfg.max_image_edge,
    };
    match HttpJudge::new(judge_config) {
        Ok(judge) => {
            log::info!("Use HTTP vision judge ({})", cfg.model);
            JudgeGw::new(judge)
        }
        Err(err) => {
            log::error!("Failed to initialize the vision judge: {err}");
            JudgeGw::new(UnconfiguredJudge)
        }
    }
}

pub fn image_store(cfg: &config::Images) -> anyhow::Result<FsImageStore> {
    FsImageStore::new(&cfg.directory)
}

// Stand-in while no judge backend is configured. Failing as
// "unavailable" keeps the affected photos pending so a later
// redelivery (with a configured judge) can still verify them.
struct UnconfiguredJudge;

impl VerificationJudge for UnconfiguredJudge {
    fn judge(&self, _: &JudgeRequest) -> Result<Verdict, JudgeUnavailable> {
        Err(anyhow::anyhow!("No visual judge configured").into())
    }
}

pub struct JudgeGw(Box<dyn VerificationJudge + Send + Sync + 'static>);

impl JudgeGw {
    pub fn new<G>(gw: G) -> Self
    where
        G: VerificationJudge + Send + Sync + 'static,
    {
        Self(Box::new(gw))
    }
}

impl VerificationJudge for JudgeGw {
    fn judge(&self, request: &JudgeRequest) -> Result<Verdict, JudgeUnavailable> {
        self.0.judge(request)
    }
}
