pub mod chart_object;
pub mod selection;
pub mod selection_result;
pub mod table;

pub use chart_object::{ChartNode, DataVisitor, ToChartSpec};
pub use selection::{Projection, SelectionDefinition, SelectionKind};
pub use selection_result::{
    MULTI_AGGREGATE_KEY, SELECTION_NAME_KEY, SelectionResult, SelectionValue,
};
pub use table::{Record, Table};
