pub mod tab_state;
