pub mod detail_view;
pub mod list_selector;
pub mod navigation;
pub mod table_renderer;

pub use detail_view::{record_details, DetailView};
pub use list_selector::{ListSelectionResult, ListSelector};
pub use table_renderer::{record_table, Table, TableColumn};
