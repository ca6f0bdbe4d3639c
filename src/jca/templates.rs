//! Address templates of the JCA subsystem.

use crate::model::ThreadPoolVariant;
use mgmt_framework::AddressTemplate;

pub const JCA_TEMPLATE: &str = "subsystem=jca";
pub const WORKMANAGER_TEMPLATE: &str = "subsystem=jca/workmanager=*";
pub const DISTRIBUTED_WORKMANAGER_TEMPLATE: &str = "subsystem=jca/distributed-workmanager=*";
pub const WORKMANAGER_LRT_TEMPLATE: &str = "subsystem=jca/workmanager=*/long-running-threads=*";
pub const WORKMANAGER_SRT_TEMPLATE: &str = "subsystem=jca/workmanager=*/short-running-threads=*";
pub const TRACER_TEMPLATE: &str = "subsystem=jca/tracer=tracer";

/// Metadata template of a pool variant.
pub fn thread_pool_template(variant: ThreadPoolVariant) -> AddressTemplate {
    match variant {
        ThreadPoolVariant::LongRunning => AddressTemplate::of(WORKMANAGER_LRT_TEMPLATE),
        ThreadPoolVariant::ShortRunning => AddressTemplate::of(WORKMANAGER_SRT_TEMPLATE),
    }
}
