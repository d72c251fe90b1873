pub mod userdata;
