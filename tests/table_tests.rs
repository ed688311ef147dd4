use designspace::parameter::{Parameter, ParameterKind};
use designspace::table::{read_parameters, write_parameters};
use designspace::Error;

#[test]
fn documented_example_table_loads() {
    let csv = "\
NAME,TYPE,,,
a_real,real,0,1.1,
an_int,int,1,9,
a_categorical,cat,a,b,c
";
    let parameters = read_parameters(csv.as_bytes()).unwrap();

    assert_eq!(parameters.len(), 3);
    assert!(matches!(parameters[0].kind(), ParameterKind::Real));
    assert_eq!(parameters[0].lower_bound(), 0.0);
    assert_eq!(parameters[0].upper_bound(), 1.1);

    assert!(matches!(parameters[1].kind(), ParameterKind::Integer));
    assert_eq!(parameters[1].lower_bound(), 1.0);
    assert_eq!(parameters[1].upper_bound(), 9.0);

    assert!(matches!(
        parameters[2].kind(),
        ParameterKind::Categorical { .. }
    ));
    assert_eq!(parameters[2].index_for_cat("b").unwrap(), 1);
}

#[test]
fn bounds_and_categories_survive_a_round_trip() {
    let parameters = vec![
        Parameter::real("a_real", 0.0, 1.1).unwrap(),
        Parameter::integer("an_int", 1, 9).unwrap(),
        Parameter::categorical("a_categorical", ["a", "b", "c"]).unwrap(),
    ];

    let mut buf = Vec::new();
    write_parameters(&parameters, &mut buf).unwrap();
    let reread = read_parameters(buf.as_slice()).unwrap();

    assert_eq!(reread, parameters);
}

#[test]
fn resolution_and_default_are_lossy_by_design() {
    let parameters = vec![Parameter::real("x", 0.0, 1.0)
        .unwrap()
        .with_resolution(vec![0.0, 0.5, 1.0])
        .unwrap()
        .with_default(0.5)];

    let mut buf = Vec::new();
    write_parameters(&parameters, &mut buf).unwrap();
    let reread = read_parameters(buf.as_slice()).unwrap();

    assert_eq!(reread[0].lower_bound(), 0.0);
    assert_eq!(reread[0].upper_bound(), 1.0);
    assert!(reread[0].resolution().is_empty());
    assert!(reread[0].default().is_none());
}

#[test]
fn type_inference_follows_integrality() {
    let csv = "name,,\nn,1,9\nx,1,9.5\n";
    let parameters = read_parameters(csv.as_bytes()).unwrap();
    assert!(matches!(parameters[0].kind(), ParameterKind::Integer));
    assert!(matches!(parameters[1].kind(), ParameterKind::Real));
}

#[test]
fn more_or_fewer_than_two_values_infer_categorical() {
    let csv = "name,,,,\ncolors,red,green,blue,white\n";
    let parameters = read_parameters(csv.as_bytes()).unwrap();
    assert!(matches!(
        parameters[0].kind(),
        ParameterKind::Categorical { .. }
    ));
    assert_eq!(parameters[0].index_for_cat("white").unwrap(), 3);
}

#[test]
fn missing_name_column_is_a_configuration_error() {
    let csv = "id,0,1\nx,0,1\n";
    assert!(matches!(
        read_parameters(csv.as_bytes()),
        Err(Error::MissingNameColumn)
    ));
}

#[test]
fn declared_row_with_wrong_value_count_names_the_row() {
    let csv = "name,type,0,1,2\nbroken,int,1,2,3\n";
    assert!(matches!(
        read_parameters(csv.as_bytes()),
        Err(Error::WrongValueCount { name, got: 3 }) if name == "broken"
    ));
}

#[test]
fn inverted_bounds_in_a_row_name_the_row() {
    let csv = "name,type,0,1\nupside_down,real,5,1\n";
    assert!(matches!(
        read_parameters(csv.as_bytes()),
        Err(Error::InvalidBounds { name, .. }) if name == "upside_down"
    ));
}

#[test]
fn single_category_row_names_the_row() {
    let csv = "name,0\nlonely,only\n";
    assert!(matches!(
        read_parameters(csv.as_bytes()),
        Err(Error::TooFewCategories { name, got: 1 }) if name == "lonely"
    ));
}

#[test]
fn trailing_empty_cells_are_ignored() {
    let csv = "name,type,0,1,2,3\nx,real,0,1,,\n";
    let parameters = read_parameters(csv.as_bytes()).unwrap();
    assert_eq!(parameters[0].lower_bound(), 0.0);
    assert_eq!(parameters[0].upper_bound(), 1.0);
}

#[test]
fn boolean_exports_as_its_unit_bounds() {
    let parameters = vec![Parameter::boolean("flag").unwrap()];
    let mut buf = Vec::new();
    write_parameters(&parameters, &mut buf).unwrap();
    let csv = String::from_utf8(buf).unwrap();
    assert_eq!(csv.lines().nth(1), Some("flag,0,1"));

    // Lossy direction: the reread row comes back integer-typed.
    let reread = read_parameters(csv.as_bytes()).unwrap();
    assert!(matches!(reread[0].kind(), ParameterKind::Integer));
}
