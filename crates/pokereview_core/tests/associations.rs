use pokereview_core::db::open_db_in_memory;
use pokereview_core::{
    CategoryRepository, CategoryService, CountryRepository, CountryService, NewOwner, NewPokemon,
    OwnerRepository, OwnerService, PokemonRepository, RepoError, SqliteCategoryRepository,
    SqliteCountryRepository, SqliteOwnerRepository, SqlitePokemonRepository,
};
use rusqlite::Connection;

fn seed_country(conn: &Connection, name: &str) -> i64 {
    let mut repo = SqliteCountryRepository::try_new(conn).unwrap();
    repo.create_country(name).unwrap()
}

fn seed_owner(conn: &mut Connection, first_name: &str, country_id: i64) -> i64 {
    let mut repo = SqliteOwnerRepository::try_new(conn).unwrap();
    repo.create_owner(&NewOwner {
        first_name: first_name.to_string(),
        last_name: "Trainer".to_string(),
        gate: "Route 1".to_string(),
        country_id,
    })
    .unwrap()
}

fn seed_category(conn: &mut Connection, name: &str) -> i64 {
    let mut repo = SqliteCategoryRepository::try_new(conn).unwrap();
    repo.create_category(name).unwrap()
}

fn seed_pokemon(conn: &mut Connection, owner_id: i64, category_id: i64, name: &str) -> i64 {
    let mut repo = SqlitePokemonRepository::try_new(conn).unwrap();
    repo.create_pokemon(owner_id, category_id, &NewPokemon::new(name, 0))
        .unwrap()
}

#[test]
fn pokemon_by_owner_walks_the_join_table_in_id_order() {
    let mut conn = open_db_in_memory().unwrap();
    let country_id = seed_country(&conn, "Japan");
    let ash = seed_owner(&mut conn, "Ash", country_id);
    let misty = seed_owner(&mut conn, "Misty", country_id);
    let electric = seed_category(&mut conn, "Electric");

    let pikachu = seed_pokemon(&mut conn, ash, electric, "Pikachu");
    let raichu = seed_pokemon(&mut conn, ash, electric, "Raichu");
    seed_pokemon(&mut conn, misty, electric, "Staryu");

    let repo = SqliteOwnerRepository::try_new(&mut conn).unwrap();
    let owned = repo.pokemon_by_owner(ash).unwrap();
    let ids: Vec<i64> = owned.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![pikachu, raichu]);
}

#[test]
fn owners_of_pokemon_returns_the_linked_owner() {
    let mut conn = open_db_in_memory().unwrap();
    let country_id = seed_country(&conn, "Japan");
    let ash = seed_owner(&mut conn, "Ash", country_id);
    let electric = seed_category(&mut conn, "Electric");
    let pikachu = seed_pokemon(&mut conn, ash, electric, "Pikachu");

    let repo = SqliteOwnerRepository::try_new(&mut conn).unwrap();
    let owners = repo.owners_of_pokemon(pikachu).unwrap();
    assert_eq!(owners.len(), 1);
    assert_eq!(owners[0].id, ash);
    assert_eq!(owners[0].first_name, "Ash");
}

#[test]
fn pokemon_by_category_and_categories_of_pokemon_are_symmetric() {
    let mut conn = open_db_in_memory().unwrap();
    let country_id = seed_country(&conn, "Japan");
    let ash = seed_owner(&mut conn, "Ash", country_id);
    let electric = seed_category(&mut conn, "Electric");
    let water = seed_category(&mut conn, "Water");
    let pikachu = seed_pokemon(&mut conn, ash, electric, "Pikachu");
    seed_pokemon(&mut conn, ash, water, "Squirtle");

    let repo = SqliteCategoryRepository::try_new(&mut conn).unwrap();

    let electric_pokemon = repo.pokemon_by_category(electric).unwrap();
    assert_eq!(electric_pokemon.len(), 1);
    assert_eq!(electric_pokemon[0].id, pikachu);

    let categories = repo.categories_of_pokemon(pikachu).unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].id, electric);
}

#[test]
fn owner_traversal_services_report_not_found_for_unknown_anchors() {
    let mut conn = open_db_in_memory().unwrap();
    seed_country(&conn, "Japan");

    {
        let service = OwnerService::new(SqliteOwnerRepository::try_new(&mut conn).unwrap());
        let err = service.pokemon_by_owner(8).unwrap_err();
        assert!(matches!(err, RepoError::NotFound { entity: "owner", id: 8 }));
    }

    let service = CategoryService::new(SqliteCategoryRepository::try_new(&mut conn).unwrap());
    let err = service.pokemon_by_category(8).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "category", id: 8 }));
}

#[test]
fn country_traversals_resolve_both_directions() {
    let mut conn = open_db_in_memory().unwrap();
    let japan = seed_country(&conn, "Japan");
    let kanto = seed_country(&conn, "Kanto");
    let ash = seed_owner(&mut conn, "Ash", japan);
    seed_owner(&mut conn, "Misty", kanto);

    let service = CountryService::new(SqliteCountryRepository::try_new(&conn).unwrap());

    let owners = service.owners_of_country(japan).unwrap();
    assert_eq!(owners.len(), 1);
    assert_eq!(owners[0].first_name, "Ash");

    let country = service.country_of_owner(ash).unwrap();
    assert_eq!(country.id, japan);
    assert_eq!(country.name, "Japan");

    let err = service.country_of_owner(99).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "owner", id: 99 }));
}

#[test]
fn deleting_an_owner_removes_its_association_rows() {
    let mut conn = open_db_in_memory().unwrap();
    let country_id = seed_country(&conn, "Japan");
    let ash = seed_owner(&mut conn, "Ash", country_id);
    let electric = seed_category(&mut conn, "Electric");
    let pikachu = seed_pokemon(&mut conn, ash, electric, "Pikachu");

    {
        let mut repo = SqliteOwnerRepository::try_new(&mut conn).unwrap();
        repo.delete_owner(ash).unwrap();
    }

    let links: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pokemon_owners WHERE owner_id = ?1;",
            [ash],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(links, 0);

    // The pokemon itself survives; only the edge goes away.
    let repo = SqlitePokemonRepository::try_new(&mut conn).unwrap();
    assert!(repo.get_pokemon(pikachu).unwrap().is_some());
}

#[test]
fn deleting_a_country_with_owners_is_blocked_by_the_store() {
    let mut conn = open_db_in_memory().unwrap();
    let japan = seed_country(&conn, "Japan");
    seed_owner(&mut conn, "Ash", japan);

    let mut repo = SqliteCountryRepository::try_new(&conn).unwrap();
    let err = repo.delete_country(japan).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)), "FK must block the delete");

    assert!(repo.country_exists(japan).unwrap());
}
