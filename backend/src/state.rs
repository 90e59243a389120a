use crate::admission::AdmissionGate;
use crate::config::Config;
use crate::consumables::Consumables;
use crate::dispatch::Dispatcher;
use crate::notify::Notifier;
use crate::pipeline::transform::Transformer;
use crate::pipeline::TransformChain;
use crate::spooler::Spooler;
use std::sync::Arc;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct KioskState {
    pub gate: Arc<AdmissionGate>,
    pub chain: Arc<TransformChain>,
    pub dispatcher: Arc<Dispatcher>,
    pub consumables: Arc<Consumables>,
}

impl KioskState {
    pub fn new(
        config: &Config,
        spooler: Arc<dyn Spooler>,
        transformer: Arc<dyn Transformer>,
        notifier: Notifier,
    ) -> Self {
        let consumables = Arc::new(Consumables::new(
            spooler.clone(),
            notifier,
            config.initial_papers,
            config.low_paper,
        ));

        Self {
            gate: Arc::new(AdmissionGate::new(consumables.clone(), config.check_inks)),
            chain: Arc::new(TransformChain::new(config.tmp_dir.clone(), transformer)),
            dispatcher: Arc::new(Dispatcher::new(
                spooler,
                consumables.clone(),
                config.media.clone(),
            )),
            consumables,
        }
    }
}
