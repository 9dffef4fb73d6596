pub mod floor_plan_view;
pub mod marker_list;
